use hrdesk_core::tax::professional_tax;
use hrdesk_core::{DomainError, ProfessionalTax, SalaryStructureId};
use serde::{Deserialize, Serialize};

use super::ListParams;
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedEarnings {
    pub basic_percentage: f64,
    pub hra_percentage: f64,
    pub da_percentage: f64,
    pub other_allowance_percentage: f64,
}

impl FixedEarnings {
    fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("basic", self.basic_percentage),
            ("HRA", self.hra_percentage),
            ("DA", self.da_percentage),
            ("other allowance", self.other_allowance_percentage),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Epf {
    pub employee_contribution: f64,
    pub employer_contribution: f64,
    pub max_limit: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Esi {
    pub employee_contribution: f64,
    pub employer_contribution: f64,
    pub applicability_limit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalTaxSlabLabel {
    pub range: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalTaxSetting {
    pub state: String,
    pub slabs: Vec<ProfessionalTaxSlabLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatutoryDeductions {
    pub epf: Epf,
    pub esi: Esi,
    pub professional_tax: ProfessionalTaxSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructure {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SalaryStructureId>,
    pub name: String,
    #[serde(default)]
    pub fixed_earnings: FixedEarnings,
    #[serde(default)]
    pub statutory_deductions: StatutoryDeductions,
}

impl SalaryStructure {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("salary structure name is required"));
        }

        let mut total = 0.0;
        for (component, pct) in self.fixed_earnings.components() {
            if !(0.0..=100.0).contains(&pct) {
                return Err(DomainError::validation(format!(
                    "{component} percentage must be between 0 and 100, got {pct}"
                )));
            }
            total += pct;
        }
        if total > 100.0 {
            return Err(DomainError::validation(format!(
                "fixed earnings add up to {total}%"
            )));
        }
        Ok(())
    }

    /// Professional tax under this structure's configured state; `None` when
    /// the state has no schedule.
    pub fn professional_tax_for(
        &self,
        monthly_gross: f64,
        is_last_month: bool,
    ) -> Result<Option<ProfessionalTax>, DomainError> {
        professional_tax(
            &self.statutory_deductions.professional_tax.state,
            monthly_gross,
            is_last_month,
        )
    }
}

pub struct SalaryStructureApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SalaryStructureApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<SalaryStructure>, ApiError> {
        self.client
            .data(params.apply(ApiRequest::get(&["salary-structure"])))
            .await
    }

    pub async fn create(&self, structure: &SalaryStructure) -> Result<SalaryStructure, ApiError> {
        structure.validate()?;
        self.client
            .data(ApiRequest::post(&["salary-structure"]).json(structure)?)
            .await
    }

    pub async fn update(
        &self,
        id: &SalaryStructureId,
        structure: &SalaryStructure,
    ) -> Result<SalaryStructure, ApiError> {
        structure.validate()?;
        self.client
            .data(ApiRequest::put(&["salary-structure", id.as_str()]).json(structure)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_core::TaxTerm;
    use serde_json::json;

    fn structure(state: &str) -> SalaryStructure {
        serde_json::from_value(json!({
            "_id": "ss1",
            "name": "Standard",
            "fixedEarnings": {
                "basicPercentage": 50,
                "hraPercentage": 20,
                "daPercentage": 10,
                "otherAllowancePercentage": 20
            },
            "statutoryDeductions": {
                "epf": { "employeeContribution": 12, "employerContribution": 12, "maxLimit": 15000 },
                "professionalTax": { "state": state, "slabs": [] }
            }
        }))
        .unwrap()
    }

    #[test]
    fn decodes_and_validates() {
        let s = structure("Maharashtra");
        assert!(s.validate().is_ok());
        assert_eq!(s.statutory_deductions.esi, Esi::default());
    }

    #[test]
    fn over_allocated_earnings_are_rejected() {
        let mut s = structure("Maharashtra");
        s.fixed_earnings.hra_percentage = 40.0;
        assert!(s.validate().is_err());
        s.fixed_earnings.hra_percentage = -1.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn tax_uses_configured_state() {
        let s = structure("Maharashtra");
        let tax = s.professional_tax_for(12_000.0, true).unwrap();
        assert_eq!(tax, Some(ProfessionalTax { amount: 300, term: TaxTerm::Monthly }));

        assert_eq!(structure("Atlantis").professional_tax_for(12_000.0, false), Ok(None));
        assert!(s.professional_tax_for(f64::INFINITY, false).is_err());
    }
}
