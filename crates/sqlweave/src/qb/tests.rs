//! Integration tests for the qb module.

use crate::dialect::{Backend, Dialect};
use crate::error::{Clause, QbError, QbResult};
use crate::qb::{BuildState, Expr, Order, QueryBuilder, Var, select};
use crate::value::Value;

fn company_report(q: &mut QueryBuilder) -> QbResult<String> {
    q.select(["company", "SUM(employees)"])?
        .from(["query_test"])?
        .where_([Expr::eq(1, 1)])?
        .group_by(["company"])?
        .order_by("company", Order::Desc)?
        .limit(1)?;
    q.build()
}

#[test]
fn test_end_to_end_standard() {
    let mut q = select(Backend::Standard.dialect());
    assert_eq!(
        company_report(&mut q).unwrap(),
        "SELECT company, SUM(employees) FROM query_test WHERE 1 = 1 GROUP BY company ORDER BY company DESC LIMIT 1"
    );
}

#[test]
fn test_end_to_end_oracle() {
    let mut q = select(Backend::Oracle.dialect());
    assert_eq!(
        company_report(&mut q).unwrap(),
        "SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( \
         SELECT company, SUM(employees) FROM query_test WHERE 1 = 1 GROUP BY company ORDER BY company DESC \
         ) a WHERE ROWNUM <= 1 ) WHERE rn >= 1"
    );
}

#[test]
fn test_build_is_deterministic() {
    let mut q = select(Backend::Postgres.dialect());
    let first = company_report(&mut q).unwrap();
    assert_eq!(q.build().unwrap(), first);
    assert_eq!(q.get_query().unwrap(), first);
}

#[test]
fn test_reset_replays_identically() {
    let mut q = select(Backend::Oracle.dialect());
    let first = company_report(&mut q).unwrap();
    q.reset();
    assert_eq!(q.state(), BuildState::Empty);
    assert_eq!(company_report(&mut q).unwrap(), first);
}

#[test]
fn test_duplicate_clauses_are_rejected() {
    let mut q = select(Backend::Standard.dialect());
    q.select(["a"])
        .unwrap()
        .from(["t"])
        .unwrap()
        .where_([Expr::gt("a", 1)])
        .unwrap()
        .group_by(["a"])
        .unwrap()
        .having([Expr::gt("COUNT(*)", 1)])
        .unwrap();

    let err = q.select(["b"]).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::Select }));
    let err = q.from(["u"]).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::From }));
    let err = q.where_([Expr::lt("a", 5)]).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::Where }));
    let err = q.group_by(["b"]).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::GroupBy }));
    let err = q.having([Expr::lt("COUNT(*)", 9)]).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::Having }));

    // Rejected calls leave the first declaration in place.
    assert_eq!(
        q.build().unwrap(),
        "SELECT a FROM t WHERE a > 1 GROUP BY a HAVING COUNT(*) > 1"
    );
}

#[test]
fn test_empty_arguments_are_rejected() {
    let mut q = select(Backend::Standard.dialect());
    let err = q.select(Vec::<&str>::new()).unwrap_err();
    assert!(err.is_empty_argument());
    assert_eq!(err.clause(), Some(Clause::Select));
    assert_eq!(
        err.to_string(),
        "SELECT requires at least one argument, .select() was called with none"
    );

    assert!(q.from(Vec::<&str>::new()).unwrap_err().is_empty_argument());
    assert!(q.where_(Vec::<Expr>::new()).unwrap_err().is_empty_argument());
    assert!(q.group_by(Vec::<&str>::new()).unwrap_err().is_empty_argument());
    assert!(q.having(Vec::<Expr>::new()).unwrap_err().is_empty_argument());
    assert!(q.order_by("", Order::Asc).unwrap_err().is_empty_argument());

    // None of the rejected calls declared anything.
    assert_eq!(q.state(), BuildState::Empty);
}

#[test]
fn test_missing_select() {
    let mut q = select(Backend::Standard.dialect());
    q.from(["t"]).unwrap();
    let err = q.build().unwrap_err();
    assert!(matches!(err, QbError::MissingClause { clause: Clause::Select }));
    assert_eq!(
        err.to_string(),
        "Missing required clause: SELECT. Add .select() to your query."
    );
}

#[test]
fn test_dummy_table_substitution() {
    let build = |dialect: &'static dyn Dialect| {
        let mut q = select(dialect);
        q.select(["1"]).unwrap();
        q.build().unwrap()
    };
    assert_eq!(build(Backend::Oracle.dialect()), "SELECT 1 FROM dual");
    assert_eq!(build(Backend::MySql.dialect()), "SELECT 1 FROM dual");
    assert_eq!(build(Backend::Postgres.dialect()), "SELECT 1");
    assert_eq!(build(Backend::Sqlite.dialect()), "SELECT 1");
}

#[test]
fn test_limit_absence_is_a_noop() {
    let mut q = select(Backend::Oracle.dialect());
    q.select(["id"]).unwrap().from(["t"]).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id FROM t");
}

#[test]
fn test_oracle_limit_offset() {
    let mut q = select(Backend::Oracle.dialect());
    q.select(["id"])
        .unwrap()
        .from(["t"])
        .unwrap()
        .limit_offset(5, 10)
        .unwrap();
    assert_eq!(
        q.build().unwrap(),
        "SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( SELECT id FROM t ) a WHERE ROWNUM <= 15 ) WHERE rn >= 11"
    );
}

#[test]
fn test_limit_last_write_wins() {
    let mut q = select(Backend::MySql.dialect());
    q.select(["id"]).unwrap().from(["t"]).unwrap().limit(5).unwrap();
    q.limit_offset(2, 4).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id FROM t LIMIT 2 OFFSET 4");

    let err = q.limit(0).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(q.limit_offset(1, -1).is_err());
    assert_eq!(q.build().unwrap(), "SELECT id FROM t LIMIT 2 OFFSET 4");
}

#[test]
fn test_paginate() {
    let mut q = select(Backend::Sqlite.dialect());
    q.select(["id"]).unwrap().from(["t"]).unwrap().paginate(3, 10).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id FROM t LIMIT 10 OFFSET 20");

    q.paginate(1, 10).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id FROM t LIMIT 10");

    assert!(q.paginate(0, 10).unwrap_err().is_invalid_argument());
    assert!(q.paginate(1, 0).unwrap_err().is_invalid_argument());
}

#[test]
fn test_order_by_accumulates() {
    let mut q = select(Backend::Standard.dialect());
    q.select(["a", "b"])
        .unwrap()
        .from(["t"])
        .unwrap()
        .order_by("a", Order::Asc)
        .unwrap()
        .order_by("b", Order::Desc)
        .unwrap();
    let err = q.order_by("a", Order::Desc).unwrap_err();
    assert!(matches!(err, QbError::DuplicateClause { clause: Clause::OrderBy }));
    assert_eq!(q.build().unwrap(), "SELECT a, b FROM t ORDER BY a ASC, b DESC");
}

#[test]
fn test_alias_resolution() {
    let mut q = select(Backend::Standard.dialect());
    q.set_aliases([("identifier", "id")]);
    q.select(["identifier"])
        .unwrap()
        .from(["query_test"])
        .unwrap()
        .where_([Expr::gt("query_test.identifier", 2)])
        .unwrap()
        .order_by("identifier", Order::Asc)
        .unwrap();
    assert_eq!(
        q.build().unwrap(),
        "SELECT id FROM query_test WHERE query_test.id > 2 ORDER BY id ASC"
    );
}

#[test]
fn test_alias_fragment() {
    let mut q = select(Backend::Standard.dialect());
    q.set_aliases([("identifier", "id")]);
    assert_eq!(q.alias("identifier", "other"), "id AS other");

    let item = q.alias("identifier", "other");
    let table = q.alias("query_test", "qt");
    q.select([item]).unwrap().from([table]).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id AS other FROM query_test AS qt");

    let mut q = select(Backend::Oracle.dialect());
    assert_eq!(q.alias("query_test", "qt"), "query_test qt");
    let table = q.alias("query_test", "qt");
    q.select(["qt.id"]).unwrap().from([table]).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT qt.id FROM query_test qt");
}

#[test]
fn test_aliases_survive_reset() {
    let mut q = select(Backend::Standard.dialect());
    q.set_aliases([("identifier", "id")]);
    q.select(["identifier"]).unwrap();
    q.reset();
    q.select(["identifier"]).unwrap();
    assert_eq!(q.build().unwrap(), "SELECT id");
}

#[test]
fn test_quoting_follows_dialect() {
    let build = |dialect: &'static dyn Dialect| {
        let mut q = select(dialect);
        q.select(["\"Full Name\""])
            .unwrap()
            .from(["`order items`"])
            .unwrap();
        q.build().unwrap()
    };
    assert_eq!(
        build(Backend::MySql.dialect()),
        "SELECT `Full Name` FROM `order items`"
    );
    assert_eq!(
        build(Backend::Postgres.dialect()),
        "SELECT \"Full Name\" FROM \"order items\""
    );
}

#[test]
fn test_state_machine() {
    let mut q = select(Backend::Standard.dialect());
    assert_eq!(q.state(), BuildState::Empty);

    q.select(["a"]).unwrap();
    assert_eq!(q.state(), BuildState::PartiallyBuilt);

    q.build().unwrap();
    assert_eq!(q.state(), BuildState::Built);
    q.build().unwrap();
    assert_eq!(q.state(), BuildState::Built);

    q.from(["t"]).unwrap();
    assert_eq!(q.state(), BuildState::PartiallyBuilt);

    q.reset();
    assert_eq!(q.state(), BuildState::Empty);
}

#[test]
fn test_where_predicates_are_anded() {
    let mut q = select(Backend::Standard.dialect());
    q.select(["*"])
        .unwrap()
        .from(["users"])
        .unwrap()
        .where_([
            Expr::eq("status", Expr::lit("active")),
            Expr::or([Expr::eq("role", Expr::lit("admin")), Expr::gt("age", 18)]),
        ])
        .unwrap();
    assert_eq!(
        q.build().unwrap(),
        "SELECT * FROM users WHERE status = 'active' AND (role = 'admin' OR age > 18)"
    );
}

#[test]
fn test_function_translation_in_select() {
    let build = |dialect: &'static dyn Dialect| {
        let mut q = select(dialect);
        q.select([
            Expr::alias(Expr::modulo("id", 2), "parity"),
            Expr::alias(Expr::concat(["first", "last"]), "name"),
        ])
        .unwrap()
        .from(["people"])
        .unwrap();
        q.build().unwrap()
    };
    assert_eq!(
        build(Backend::Sqlite.dialect()),
        "SELECT (id % 2) AS parity, (first || last) AS name FROM people"
    );
    assert_eq!(
        build(Backend::MySql.dialect()),
        "SELECT MOD(id, 2) AS parity, CONCAT(first, last) AS name FROM people"
    );
    assert_eq!(
        build(Backend::Oracle.dialect()),
        "SELECT MOD(id, 2) parity, (first || last) name FROM people"
    );
}

#[test]
fn test_numbered_placeholders_across_clauses() {
    let mut q = select(Backend::Postgres.dialect());
    let section = q.bind_param(|| "Norway");
    let min = q.bind_param(|| 10);
    q.select(["company"])
        .unwrap()
        .from(["query_test"])
        .unwrap()
        .where_([Expr::eq("section", section), Expr::neq("company", section)])
        .unwrap()
        .group_by(["company"])
        .unwrap()
        .having([Expr::gt("SUM(employees)", min)])
        .unwrap();

    let stmt = q.prepare().unwrap();
    assert_eq!(
        stmt.sql(),
        "SELECT company FROM query_test WHERE section = $1 AND company <> $1 GROUP BY company HAVING SUM(employees) > $2"
    );
    assert_eq!(stmt.values(), vec![Value::from("Norway"), Value::Int(10)]);
}

#[test]
fn test_positional_placeholders_repeat_values() {
    let mut q = select(Backend::Sqlite.dialect());
    let section = q.bind_param(|| "Norway");
    q.select(["company"])
        .unwrap()
        .from(["query_test"])
        .unwrap()
        .where_([Expr::eq("section", section), Expr::neq("company", section)])
        .unwrap();

    let stmt = q.prepare().unwrap();
    assert_eq!(
        stmt.sql(),
        "SELECT company FROM query_test WHERE section = ? AND company <> ?"
    );
    assert_eq!(stmt.values().len(), 2);
}

#[test]
fn test_oracle_placeholders() {
    let mut q = select(Backend::Oracle.dialect());
    let id = q.bind_param(|| 7);
    q.select(["name"])
        .unwrap()
        .from(["t"])
        .unwrap()
        .where_([Expr::eq("id", id)])
        .unwrap();
    assert_eq!(q.build().unwrap(), "SELECT name FROM t WHERE id = :p1");
}

#[test]
fn test_parameters_are_reread() {
    let section = Var::new("Norway".to_string());
    let mut q = select(Backend::Postgres.dialect());
    let p = q.bind_var(&section);
    q.select(["company"])
        .unwrap()
        .from(["query_test"])
        .unwrap()
        .where_([Expr::eq("section", p)])
        .unwrap();

    let stmt = q.prepare().unwrap();
    let sql = stmt.sql().to_string();
    assert_eq!(stmt.values(), vec![Value::from("Norway")]);

    section.set("Ukraine".to_string());
    assert_eq!(stmt.values(), vec![Value::from("Ukraine")]);
    assert_eq!(stmt.sql(), sql);
}

#[test]
fn test_bindings_survive_reset() {
    let mut q = select(Backend::Postgres.dialect());
    let p = q.bind_param(|| 42);
    q.select(["a"]).unwrap();
    q.reset();
    q.select(["a"])
        .unwrap()
        .from(["t"])
        .unwrap()
        .where_([Expr::eq("b", p)])
        .unwrap();
    let stmt = q.prepare().unwrap();
    assert_eq!(stmt.values(), vec![Value::Int(42)]);
}

#[test]
fn test_foreign_token_is_rejected_on_prepare() {
    let mut other = select(Backend::Postgres.dialect());
    let foreign = other.bind_param(|| 1);

    let mut q = select(Backend::Postgres.dialect());
    let own = q.bind_param(|| 99);
    q.select(["a"])
        .unwrap()
        .where_([Expr::eq("b", foreign)])
        .unwrap();
    assert_eq!(q.build().unwrap(), "SELECT a WHERE b = $1");
    assert!(q.prepare().unwrap_err().is_invalid_argument());

    q.reset();
    q.select(["a"]).unwrap().where_([Expr::eq("b", own)]).unwrap();
    assert_eq!(q.prepare().unwrap().values(), vec![Value::Int(99)]);
}

#[test]
fn test_literal_operands_follow_dialect() {
    let build = |dialect: &'static dyn Dialect| {
        let mut q = select(dialect);
        q.select(["id"])
            .unwrap()
            .from(["t"])
            .unwrap()
            .where_([
                Expr::eq("active", true),
                Expr::eq("note", Expr::lit(r"it's a\b")),
            ])
            .unwrap();
        q.build().unwrap()
    };
    assert_eq!(
        build(Backend::Postgres.dialect()),
        r"SELECT id FROM t WHERE active = TRUE AND note = 'it''s a\b'"
    );
    assert_eq!(
        build(Backend::MySql.dialect()),
        r"SELECT id FROM t WHERE active = 1 AND note = 'it''s a\\b'"
    );
}
