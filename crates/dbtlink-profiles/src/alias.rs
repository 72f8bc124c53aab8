//! Field alias table
//!
//! dbt adapters accept several spellings for some fields. Each canonical
//! field lists its candidates in priority order; the first candidate that is
//! present and non-empty wins. The order is the same for every warehouse:
//! the short/legacy spelling comes first (`pass` before `password`,
//! `dbname` before `database`).

use dbtlink_core::WarehouseType;
use serde_json::Value;
use crate::store::RawTarget;

/// Ordered candidate spellings for one canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// Name of the field in the canonical credentials
    pub canonical: &'static str,

    /// Raw field names, highest priority first
    pub candidates: &'static [&'static str],
}

/// Postgres-family and Trino password
pub const PASSWORD: FieldAlias = FieldAlias {
    canonical: "password",
    candidates: &["pass", "password"],
};

/// Postgres-family database name
pub const DBNAME: FieldAlias = FieldAlias {
    canonical: "dbname",
    candidates: &["dbname", "database"],
};

/// BigQuery dataset (dbt also accepts `schema`)
pub const DATASET: FieldAlias = FieldAlias {
    canonical: "dataset",
    candidates: &["dataset", "schema"],
};

/// Trino catalog, stored as `dbname` (dbt-trino accepts `database` or `catalog`)
pub const CATALOG: FieldAlias = FieldAlias {
    canonical: "dbname",
    candidates: &["database", "catalog"],
};

impl FieldAlias {
    /// First present, non-empty string candidate
    pub fn resolve<'a>(&self, target: &'a RawTarget) -> Option<&'a str> {
        self.candidates.iter().find_map(|candidate| {
            target
                .get(*candidate)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        })
    }

    /// Candidate spellings, for error messages
    pub fn candidate_list(&self) -> Vec<&'static str> {
        self.candidates.to_vec()
    }
}

/// Aliased fields per warehouse
pub fn aliases_for(warehouse: WarehouseType) -> &'static [FieldAlias] {
    match warehouse {
        WarehouseType::Postgres | WarehouseType::Redshift | WarehouseType::RisingWave => {
            &[PASSWORD, DBNAME]
        }
        WarehouseType::Trino => &[PASSWORD, CATALOG],
        WarehouseType::BigQuery => &[DATASET],
        WarehouseType::Snowflake | WarehouseType::Databricks => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target(value: Value) -> RawTarget {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn short_alias_wins() {
        let raw = target(json!({"pass": "short", "password": "long"}));
        assert_eq!(PASSWORD.resolve(&raw), Some("short"));

        let raw = target(json!({"dbname": "a", "database": "b"}));
        assert_eq!(DBNAME.resolve(&raw), Some("a"));
    }

    #[test]
    fn falls_through_empty_and_null() {
        let raw = target(json!({"pass": "", "password": "secret"}));
        assert_eq!(PASSWORD.resolve(&raw), Some("secret"));

        let raw = target(json!({"pass": null, "password": "secret"}));
        assert_eq!(PASSWORD.resolve(&raw), Some("secret"));
    }

    #[test]
    fn either_alias_alone_is_equivalent() {
        let short = target(json!({"dbname": "analytics"}));
        let long = target(json!({"database": "analytics"}));
        assert_eq!(DBNAME.resolve(&short), DBNAME.resolve(&long));
    }

    #[test]
    fn nothing_present() {
        let raw = target(json!({"user": "u"}));
        assert_eq!(PASSWORD.resolve(&raw), None);
        assert_eq!(PASSWORD.candidate_list(), vec!["pass", "password"]);
    }

    #[test]
    fn every_warehouse_has_an_alias_entry() {
        for warehouse in WarehouseType::ALL {
            for alias in aliases_for(warehouse) {
                assert!(!alias.candidates.is_empty(), "{} has an empty alias", warehouse);
            }
        }
        assert_eq!(aliases_for(WarehouseType::RisingWave), &[PASSWORD, DBNAME]);
    }

    #[test]
    fn trino_catalog_lands_in_dbname() {
        assert_eq!(CATALOG.canonical, DBNAME.canonical);

        let raw = target(json!({"catalog": "hive"}));
        assert_eq!(CATALOG.resolve(&raw), Some("hive"));
    }
}
