//! SQL statement splitting
//!
//! sqlx's prepared-statement protocol executes one statement per call, so a
//! migration file's text is split into individual statements before it is
//! submitted to the pool.

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Split a migration file's text into executable statements.
///
/// Falls back to naive semicolon splitting when the file does not parse, so
/// dialect-specific DDL that sqlparser rejects still reaches the server.
pub fn split_statements(sql: &str) -> Vec<String> {
    let dialect = GenericDialect {};

    match Parser::parse_sql(&dialect, sql) {
        Ok(parsed) => parsed
            .into_iter()
            .map(|statement| format!("{};", statement))
            .collect(),
        Err(e) => {
            tracing::warn!("SQL parsing failed, using naive semicolon splitting: {}", e);
            sql.split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("{};", s))
                .collect()
        }
    }
}
