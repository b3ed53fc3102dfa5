//! Bodies of the CLI commands. Each returns the lines to print; the caller
//! owns stdout.

use crate::db::{DbError, OracleSession, Record};

pub const DB_CHECK_SQL: &str = "SELECT 'x' AS column1 FROM dual";

const DB_CHECK_OK: &str = "Test Oracle - OK";
const DB_CHECK_ERROR: &str = "Test Oracle - ERROR";

pub fn greeting(name: &str) -> String {
    format!("Hello, {name}!")
}

pub fn echo(arg: &str) -> String {
    format!("Argument - {arg}")
}

pub fn db_check(session: &OracleSession) -> Result<&'static str, DbError> {
    let record = session.query_one(DB_CHECK_SQL)?;
    Ok(db_check_verdict(record.as_ref()))
}

fn db_check_verdict(record: Option<&Record>) -> &'static str {
    if record.is_some_and(|record| record.contains("column1")) {
        DB_CHECK_OK
    } else {
        DB_CHECK_ERROR
    }
}

pub fn query(session: &OracleSession, sql: &str) -> Result<Vec<String>, DbError> {
    Ok(render_rows(&session.query(sql)?))
}

pub fn execute(session: &OracleSession, sql: &str) -> Result<String, DbError> {
    let affected = session.execute(sql)?;
    Ok(format!("{affected} row(s) affected"))
}

fn render_rows(records: &[Record]) -> Vec<String> {
    let mut lines: Vec<String> = records.iter().map(Record::to_string).collect();
    lines.push(format!("({} row(s))", records.len()));
    lines
}
