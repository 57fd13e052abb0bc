// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference catalog of companies, substations and tables.
//!
//! The catalog is static reference data owned by an external system. It is
//! loaded once, validated, and then only read.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DomainError;

/// Company code of the national grid operator.
pub const OPERATOR_COMPANY_CODE: &str = "ONS";

/// A company participating in the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub code: String,
    pub name: String,
}

/// A substation owned by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substation {
    pub code: String,
    pub name: String,
    pub company_code: String,
}

/// A named partition of a company's substations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub code: String,
    pub name: String,
    pub company_code: String,
    /// Substation codes grouped under this table.
    #[serde(default)]
    pub substations: Vec<String>,
}

impl Table {
    /// Returns true if the substation belongs to this table.
    #[must_use]
    pub fn contains_substation(&self, substation_code: &str) -> bool {
        self.substations.iter().any(|code| code == substation_code)
    }
}

/// Raw catalog definition as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub substations: Vec<Substation>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Validated, read-only reference catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCatalog {
    companies: Vec<Company>,
    substations: Vec<Substation>,
    tables: Vec<Table>,
}

impl ReferenceCatalog {
    /// Builds a catalog, checking that every reference resolves.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCatalog` if:
    /// - the operator company is missing
    /// - a company, substation or table code is duplicated
    /// - a substation or table names an unknown company
    /// - a table lists a substation owned by another company
    pub fn new(definition: CatalogDefinition) -> Result<Self, DomainError> {
        let CatalogDefinition {
            companies,
            substations,
            tables,
        } = definition;

        let mut company_codes: HashSet<&str> = HashSet::new();
        for company in &companies {
            if !company_codes.insert(company.code.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate company '{}'",
                    company.code
                )));
            }
        }
        if !company_codes.contains(OPERATOR_COMPANY_CODE) {
            return Err(DomainError::InvalidCatalog(format!(
                "operator company '{OPERATOR_COMPANY_CODE}' is not defined"
            )));
        }

        let mut substation_codes: HashSet<&str> = HashSet::new();
        for substation in &substations {
            if !company_codes.contains(substation.company_code.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "substation '{}' references unknown company '{}'",
                    substation.code, substation.company_code
                )));
            }
            if !substation_codes.insert(substation.code.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate substation '{}'",
                    substation.code
                )));
            }
        }

        let mut table_keys: HashSet<(&str, &str)> = HashSet::new();
        for table in &tables {
            if !company_codes.contains(table.company_code.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "table '{}' references unknown company '{}'",
                    table.code, table.company_code
                )));
            }
            if !table_keys.insert((table.company_code.as_str(), table.code.as_str())) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate table '{}' for company '{}'",
                    table.code, table.company_code
                )));
            }
            for code in &table.substations {
                let owned: bool = substations
                    .iter()
                    .any(|s| s.code == *code && s.company_code == table.company_code);
                if !owned {
                    return Err(DomainError::InvalidCatalog(format!(
                        "table '{}' lists substation '{code}' outside company '{}'",
                        table.code, table.company_code
                    )));
                }
            }
        }

        Ok(Self {
            companies,
            substations,
            tables,
        })
    }

    /// The catalog used when no catalog file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let company = |code: &str, name: &str| Company {
            code: code.to_string(),
            name: name.to_string(),
        };
        let substation = |code: &str, name: &str| Substation {
            code: code.to_string(),
            name: name.to_string(),
            company_code: String::from("CTEEP"),
        };
        let table = |code: &str, company_code: &str, substations: &[&str]| Table {
            code: code.to_string(),
            name: format!("Tabela {code}"),
            company_code: company_code.to_string(),
            substations: substations.iter().map(ToString::to_string).collect(),
        };

        Self {
            companies: vec![
                company("ONS", "Operador Nacional do Sistema Elétrico"),
                company("CTEEP", "ISA CTEEP"),
                company("CHESF", "Companhia Hidro Elétrica do São Francisco"),
            ],
            substations: vec![
                substation("PIR", "Piratininga II"),
                substation("MIR", "Mirassol II"),
                substation("ATI", "Atibaia II"),
                substation("MOS", "Mosque"),
                substation("SAL", "Salto"),
                substation("TES", "Teste"),
            ],
            tables: vec![
                table("A1", "CTEEP", &["MIR", "PIR"]),
                table("A2", "CTEEP", &["ATI", "MOS", "TES"]),
                table("A3", "CTEEP", &["SAL"]),
                table("B1", "CHESF", &[]),
            ],
        }
    }

    /// Returns true if the company code is known.
    #[must_use]
    pub fn has_company(&self, code: &str) -> bool {
        self.companies.iter().any(|c| c.code == code)
    }

    /// Returns all companies.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Returns all substations in catalog order.
    #[must_use]
    pub fn substations(&self) -> &[Substation] {
        &self.substations
    }

    /// Finds a substation by code.
    #[must_use]
    pub fn substation(&self, code: &str) -> Option<&Substation> {
        self.substations.iter().find(|s| s.code == code)
    }

    /// Finds a substation by code, only if owned by `company_code`.
    #[must_use]
    pub fn substation_of_company(&self, company_code: &str, code: &str) -> Option<&Substation> {
        self.substations
            .iter()
            .find(|s| s.code == code && s.company_code == company_code)
    }

    /// Returns the tables owned by a company, in catalog order.
    pub fn tables_of_company<'a>(&'a self, company_code: &'a str) -> impl Iterator<Item = &'a Table> {
        self.tables
            .iter()
            .filter(move |t| t.company_code == company_code)
    }

    /// Finds a table by code.
    ///
    /// When `company_code` is given only that company's tables are searched.
    #[must_use]
    pub fn table(&self, company_code: Option<&str>, code: &str) -> Option<&Table> {
        self.tables
            .iter()
            .filter(|t| company_code.is_none_or(|company| t.company_code == company))
            .find(|t| t.code == code)
    }
}
