use sqlweave::prelude::*;

const INNER: &str = "SELECT company, SUM(employees) FROM query_test WHERE 1 = 1 GROUP BY company ORDER BY company DESC";

fn report(dialect: &'static dyn Dialect, count: i64, offset: i64) -> QbResult<String> {
    let mut q = QueryBuilder::new(dialect);
    q.select(["company", "SUM(employees)"])?
        .from(["query_test"])?
        .where_([Expr::eq(1, 1)])?
        .group_by(["company"])?
        .order_by("company", Order::Desc)?
        .limit_offset(count, offset)?;
    q.build()
}

#[test]
fn trailing_limit_backends() -> QbResult<()> {
    for backend in [Backend::Standard, Backend::Postgres, Backend::MySql, Backend::Sqlite] {
        assert_eq!(report(backend.dialect(), 1, 0)?, format!("{INNER} LIMIT 1"));
        assert_eq!(
            report(backend.dialect(), 5, 10)?,
            format!("{INNER} LIMIT 5 OFFSET 10")
        );
    }
    Ok(())
}

#[test]
fn oracle_wraps_whole_query() -> QbResult<()> {
    assert_eq!(
        report(Backend::Oracle.dialect(), 1, 0)?,
        format!("SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( {INNER} ) a WHERE ROWNUM <= 1 ) WHERE rn >= 1")
    );
    assert_eq!(
        report(Backend::Oracle.dialect(), 5, 10)?,
        format!("SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( {INNER} ) a WHERE ROWNUM <= 15 ) WHERE rn >= 11")
    );
    Ok(())
}

#[test]
fn database_handler_builds_for_its_backend() -> QbResult<()> {
    let db = Database::new(ConnectionParams::new(Backend::Oracle).database("orcl"))?;
    let mut q = db.select();
    q.select(["SYSDATE"])?;
    assert_eq!(q.build()?, "SELECT SYSDATE FROM dual");

    let db = Database::new(ConnectionParams::new(Backend::Sqlite).database("reports.db"))?;
    let mut q = db.select();
    q.select([Expr::alias(Expr::md5("name"), "digest")])?
        .from(["people"])?;
    assert_eq!(q.build()?, "SELECT md5(name) AS digest FROM people");
    assert!(
        db.required_functions()
            .iter()
            .any(|(name, args)| *name == "md5" && *args == 1)
    );
    Ok(())
}

#[test]
fn feature_queries_gate_caller_logic() {
    let multi_delete: Vec<Backend> = [
        Backend::Standard,
        Backend::Postgres,
        Backend::MySql,
        Backend::Sqlite,
        Backend::Oracle,
    ]
    .into_iter()
    .filter(|b| b.dialect().supports_feature(Feature::MultiTableDelete))
    .collect();
    assert_eq!(multi_delete, vec![Backend::MySql, Backend::Sqlite]);

    assert!(Backend::Sqlite.dialect().supports_feature_name("cross-table-update"));
    assert!(!Backend::Standard.dialect().supports_feature_name("returning"));
}
