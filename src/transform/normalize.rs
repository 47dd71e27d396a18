use tracing::{debug, warn};

use crate::columns::ID;
use crate::table::Table;

/// Rename the first alias found to the canonical identifier.
/// Returns whether the table ends up with an identifier column; when it does
/// not, a warning naming the table is emitted and nothing else changes.
pub fn normalize_id_column(table: &mut Table, aliases: &[String]) -> bool {
    for alias in aliases {
        if !table.has_column(alias) {
            continue;
        }
        if table.has_column(ID) {
            warn!(
                table = %table.name,
                alias = %alias,
                "both `{}` and `{}` present; keeping `{}` as is",
                alias,
                ID,
                alias
            );
            continue;
        }
        if let Err(e) = table.df.rename(alias, ID.into()) {
            warn!(table = %table.name, "renaming `{}` failed: {}", alias, e);
            continue;
        }
        debug!(table = %table.name, "renamed `{}` → `{}`", alias, ID);
    }

    if table.has_column(ID) {
        true
    } else {
        warn!(table = %table.name, "identifier column missing");
        println!(
            "⚠️ Coluna '{}' não encontrada no arquivo {}.csv",
            ID, table.name
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn table_with(name: &str, cols: &[&str]) -> Table {
        let columns = cols
            .iter()
            .map(|c| Column::new((*c).into(), [1i64]))
            .collect();
        Table::new(name, DataFrame::new(columns).unwrap())
    }

    fn aliases(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renames_known_variants() {
        let mut t = table_with("alunos", &["identificadorUnico", "nota"]);
        assert!(normalize_id_column(&mut t, &aliases(&["identificadorUnico", "idAluno"])));
        assert_eq!(t.column_names(), vec!["idaluno", "nota"]);

        let mut t = table_with("roi", &["idAluno"]);
        assert!(normalize_id_column(&mut t, &aliases(&["idAluno"])));
        assert!(t.has_column("idaluno"));
    }

    #[test]
    fn canonical_name_left_alone() {
        let mut t = table_with("indicadores", &["idaluno", "data"]);
        assert!(normalize_id_column(&mut t, &aliases(&["idAluno"])));
        assert_eq!(t.column_names(), vec!["idaluno", "data"]);
    }

    #[test]
    fn existing_canonical_blocks_rename() {
        let mut t = table_with("alunos", &["idaluno", "idAluno"]);
        assert!(normalize_id_column(&mut t, &aliases(&["idAluno"])));
        assert_eq!(t.column_names(), vec!["idaluno", "idAluno"]);
    }

    #[test]
    fn missing_identifier_is_not_an_error() {
        let mut t = table_with("roi", &["interativo"]);
        assert!(!normalize_id_column(&mut t, &aliases(&["idAluno"])));
        assert_eq!(t.num_rows(), 1);
        assert_eq!(t.column_names(), vec!["interativo"]);
    }
}
