#![deny(missing_docs)]

//! # Client Upgrade Recipe
//!
//! The fixed edit sequence that adds custom-field date support to the
//! ActiveCampaign API client: an env read for the field id, a class member,
//! a constructor assignment, and the optimized lookup methods inserted in
//! front of the module's export line.
//!
//! Needles, replacements and the generated method block are exact strings.
//! Reformatting the target file will stop them from matching.

use crate::patcher::rules::{PatchPlan, PatchRule};

/// Default path of the TypeScript client targeted by the upgrade.
pub const DEFAULT_TARGET: &str = "src/lib/activecampaign.ts";

/// Export line used as the anchor for inserting the generated methods.
pub const EXPORT_MARKER: &str =
    "export const activeCampaignClient = new ActiveCampaignClient()";

// The two credential env reads at the top of the module.
const ENV_READS: &str = r#"const AC_API_URL = process.env.ACTIVECAMPAIGN_API_URL // Ex: https://seudominio.api-us1.com
const AC_API_KEY = process.env.ACTIVECAMPAIGN_API_KEY"#;

// Same lines plus the custom-field id read.
const ENV_READS_WITH_CUSTOM_FIELD: &str = r#"const AC_API_URL = process.env.ACTIVECAMPAIGN_API_URL // Ex: https://seudominio.api-us1.com
const AC_API_KEY = process.env.ACTIVECAMPAIGN_API_KEY
const AC_CUSTOM_FIELD_ID = process.env.ACTIVECAMPAIGN_CUSTOM_DATE_FIELD_ID"#;

// Head of the client class, up to the last existing member declaration.
const CLIENT_MEMBERS: &str = r#"export class ActiveCampaignClient {
  private baseUrl: string
  private apiKey: string"#;

const CLIENT_MEMBERS_WITH_CUSTOM_FIELD: &str = r#"export class ActiveCampaignClient {
  private baseUrl: string
  private apiKey: string
  private customFieldId?: string"#;

// The configured branch of the constructor.
const CONFIGURED_BRANCH: &str = r#"    } else {
      this.baseUrl = AC_API_URL.replace(/\/$/, '') // Remove trailing slash
      this.apiKey = AC_API_KEY
    }"#;

const CONFIGURED_BRANCH_WITH_ASSIGNMENT: &str = r#"    } else {
      this.baseUrl = AC_API_URL.replace(/\/$/, '') // Remove trailing slash
      this.apiKey = AC_API_KEY
      this.customFieldId = AC_CUSTOM_FIELD_ID
    }"#;

// Generated methods: the field-value scan plus the deprecated delegate kept
// for callers of the old per-contact lookup. Ends with the closing brace of
// the class body the marker line follows.
const OPTIMIZED_METHODS_BLOCK: &str = r#"
  /**
   * OTIMIZADO: Busca fieldValues diretamente (não contatos individuais)
   * Reduz de 5.920 chamadas para ~60 chamadas
   */
  async getContactsByTagAndCustomDate(
    tagId: number, 
    days: number = 30, 
    customFieldId?: string
  ): Promise<{ total: number; byDay: Record<string, number> }> {
    if (!this.isConfigured()) {
      return { total: 0, byDay: {} }
    }

    const fieldId = customFieldId || this.customFieldId

    if (!fieldId) {
      console.warn('⚠️ Campo customizado não configurado')
      return { total: 0, byDay: {} }
    }

    try {
      console.log(`📊 ActiveCampaign OTIMIZADO: Buscando fieldValues do campo ${fieldId}...`)
      
      const byDay: Record<string, number> = {}
      const dataLimite = new Date(Date.now() - days * 24 * 60 * 60 * 1000)
      const dataLimiteStr = dataLimite.toISOString().split('T')[0]
      
      let offset = 0
      const limit = 100
      let totalProcessado = 0
      let comValor = 0
      
      while (true) {
        const url = `${this.baseUrl}/api/3/fieldValues?filters[field]=${fieldId}&limit=${limit}&offset=${offset}`
        
        const response = await fetch(url, {
          method: 'GET',
          headers: {
            'Api-Token': this.apiKey,
            'Content-Type': 'application/json',
          },
        })

        if (!response.ok) {
          console.error(`ActiveCampaign API error: ${response.status}`)
          break
        }

        const data = await response.json()
        const fieldValues = data.fieldValues || []
        
        if (fieldValues.length === 0) break
        
        for (const fv of fieldValues) {
          totalProcessado++
          
          if (fv.value) {
            comValor++
            let dataCadastro: Date | null = null
            
            if (fv.value.match(/^\d{2}\/\d{2}\/\d{4}$/)) {
              const [dia, mes, ano] = fv.value.split('/')
              dataCadastro = new Date(`${ano}-${mes}-${dia}`)
            } else {
              dataCadastro = new Date(fv.value)
            }
            
            if (dataCadastro && !isNaN(dataCadastro.getTime())) {
              const dia = dataCadastro.toISOString().split('T')[0]
              
              if (dia >= dataLimiteStr) {
                byDay[dia] = (byDay[dia] || 0) + 1
              }
            }
          }
        }
        
        const total = parseInt(data.meta?.total || '0', 10)
        
        if (offset === 0) {
          console.log(`  📊 Total de field values: ${total}`)
        }
        
        if (totalProcessado >= total) break
        
        offset += limit
        
        if (offset % 500 === 0) {
          console.log(`  📦 Processados ${totalProcessado}/${total}...`)
        }
      }
      
      const dentroIntervalo = Object.values(byDay).reduce((sum, count) => sum + count, 0)
      
      console.log(`✅ RÁPIDO - Processados ${comValor} valores, ${dentroIntervalo} nos últimos ${days} dias`)
      
      return {
        total: dentroIntervalo,
        byDay
      }
    } catch (error: any) {
      console.error('Error fetching field values:', error)
      return { total: 0, byDay: {} }
    }
  }

  /**
   * @deprecated Use getContactsByTagAndCustomDate
   */
  async getRecentContactsByTag(tagId: number, days: number = 30): Promise<{ total: number; byDay: Record<string, number> }> {
    return this.getContactsByTagAndCustomDate(tagId, days)
  }

}

"#;

/// Builds the ordered upgrade plan for [`DEFAULT_TARGET`].
///
/// Rules chain: the env read inserted by `custom-field-env` is what the
/// assignment added by `custom-field-assignment` refers to, and the member
/// added by `custom-field-member` is what the generated methods read.
pub fn client_upgrade_plan() -> PatchPlan {
    PatchPlan {
        target: DEFAULT_TARGET.to_string(),
        rules: vec![
            PatchRule::replace_first("custom-field-env", ENV_READS, ENV_READS_WITH_CUSTOM_FIELD),
            PatchRule::replace_first(
                "custom-field-member",
                CLIENT_MEMBERS,
                CLIENT_MEMBERS_WITH_CUSTOM_FIELD,
            ),
            PatchRule::replace_first(
                "custom-field-assignment",
                CONFIGURED_BRANCH,
                CONFIGURED_BRANCH_WITH_ASSIGNMENT,
            ),
            PatchRule::insert_before("optimized-method", EXPORT_MARKER, OPTIMIZED_METHODS_BLOCK),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::rules::{apply_rules, Edit};
    use crate::report::RuleOutcome;
    use pretty_assertions::assert_eq;

    // A condensed client file carrying every needle once, with the class
    // body still open in front of the export line.
    const CLIENT_FIXTURE: &str = r#"import { NextResponse } from 'next/server'

const AC_API_URL = process.env.ACTIVECAMPAIGN_API_URL // Ex: https://seudominio.api-us1.com
const AC_API_KEY = process.env.ACTIVECAMPAIGN_API_KEY

export class ActiveCampaignClient {
  private baseUrl: string
  private apiKey: string

  constructor() {
    if (!AC_API_URL || !AC_API_KEY) {
      console.warn('ActiveCampaign credentials missing')
      this.baseUrl = ''
      this.apiKey = ''
    } else {
      this.baseUrl = AC_API_URL.replace(/\/$/, '') // Remove trailing slash
      this.apiKey = AC_API_KEY
    }
  }

  isConfigured(): boolean {
    return Boolean(this.baseUrl && this.apiKey)
  }

export const activeCampaignClient = new ActiveCampaignClient()
"#;

    #[test]
    fn test_plan_rule_order() {
        let plan = client_upgrade_plan();
        assert_eq!(plan.target, DEFAULT_TARGET);

        let names: Vec<&str> = plan.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "custom-field-env",
                "custom-field-member",
                "custom-field-assignment",
                "optimized-method",
            ]
        );
        assert!(matches!(plan.rules[3].edit, Edit::InsertBefore { .. }));
    }

    #[test]
    fn test_client_upgrade_end_to_end() {
        let plan = client_upgrade_plan();
        let (patched, report) = apply_rules(CLIENT_FIXTURE, &plan.rules);
        assert!(report.is_clean());

        let env = patched
            .find("const AC_CUSTOM_FIELD_ID = process.env.ACTIVECAMPAIGN_CUSTOM_DATE_FIELD_ID")
            .unwrap();
        let member = patched.find("private customFieldId?: string").unwrap();
        let assignment = patched.find("this.customFieldId = AC_CUSTOM_FIELD_ID").unwrap();
        let method = patched.find("async getContactsByTagAndCustomDate(").unwrap();
        let marker = patched.find(EXPORT_MARKER).unwrap();
        assert!(env < member);
        assert!(member < assignment);
        assert!(assignment < method);
        assert!(method < marker);

        // the delegate survives for old callers
        assert!(patched.contains("async getRecentContactsByTag("));

        // block runs straight into the marker, closing the class on the way
        assert!(patched.contains(concat!(
            "\n}\n\n",
            "export const activeCampaignClient = new ActiveCampaignClient()"
        )));
    }

    #[test]
    fn test_second_run_duplicates_the_method_block() {
        let plan = client_upgrade_plan();
        let (once, _) = apply_rules(CLIENT_FIXTURE, &plan.rules);
        let (twice, report) = apply_rules(&once, &plan.rules);

        // the constructor needle no longer matches once the assignment sits
        // inside it; the other three needles still do
        assert_eq!(report.outcome("custom-field-env"), Some(RuleOutcome::Applied));
        assert_eq!(report.outcome("custom-field-member"), Some(RuleOutcome::Applied));
        assert_eq!(
            report.outcome("custom-field-assignment"),
            Some(RuleOutcome::Skipped)
        );
        assert_eq!(report.outcome("optimized-method"), Some(RuleOutcome::Applied));

        assert_eq!(twice.matches("async getContactsByTagAndCustomDate(").count(), 2);
        assert_eq!(
            twice.matches("this.customFieldId = AC_CUSTOM_FIELD_ID").count(),
            1
        );
    }

    #[test]
    fn test_plan_serializes_round_trip() {
        let plan = client_upgrade_plan();

        let yaml = serde_yaml::to_string(&plan).unwrap();
        assert!(yaml.contains("custom-field-env"));
        assert!(yaml.contains("replace_first:"));
        assert!(yaml.contains("insert_before:"));

        let back: PatchPlan = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, plan);

        let json = serde_json::to_string_pretty(&plan).unwrap();
        let back: PatchPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
