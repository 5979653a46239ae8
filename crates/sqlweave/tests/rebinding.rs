use sqlweave::prelude::*;
use std::sync::Mutex;

/// Records every call instead of talking to a database.
#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl RecordingExecutor {
    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for RecordingExecutor {
    type Row = Vec<Value>;

    async fn execute(&self, sql: &str, params: &[Value]) -> QbResult<u64> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(1)
    }

    async fn query(&self, sql: &str, params: &[Value]) -> QbResult<Vec<Vec<Value>>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(vec![params.to_vec()])
    }
}

#[tokio::test]
async fn values_are_reread_between_executions() -> QbResult<()> {
    let section = Var::new("Norway".to_string());
    let min_employees = Var::new(10i64);

    let mut q = QueryBuilder::new(Backend::Postgres.dialect());
    let s = q.bind_var(&section);
    let m = q.bind_var(&min_employees);
    q.select(["company"])?
        .from(["query_test"])?
        .where_([Expr::eq("section", s), Expr::gte("employees", m)])?;
    let stmt = q.prepare()?;

    let executor = RecordingExecutor::default();
    stmt.query(&executor).await?;

    section.set("Ukraine".to_string());
    min_employees.set(20);
    let rows = stmt.query(&executor).await?;
    assert_eq!(rows, vec![vec![Value::from("Ukraine"), Value::Int(20)]]);

    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, calls[1].0);
    assert_eq!(
        calls[0].0,
        "SELECT company FROM query_test WHERE section = $1 AND employees >= $2"
    );
    assert_eq!(calls[0].1, vec![Value::from("Norway"), Value::Int(10)]);
    assert_eq!(calls[1].1, vec![Value::from("Ukraine"), Value::Int(20)]);
    Ok(())
}

#[tokio::test]
async fn positional_placeholders_send_one_value_per_occurrence() -> QbResult<()> {
    let name = Var::new("alice".to_string());

    let mut q = QueryBuilder::new(Backend::MySql.dialect());
    let p = q.bind_var(&name);
    q.select(["id"])?
        .from(["users"])?
        .where_([Expr::or([Expr::eq("login", p), Expr::eq("email", p)])])?;
    let stmt = q.prepare()?;

    let executor = RecordingExecutor::default();
    assert_eq!(stmt.execute(&executor).await?, 1);

    let calls = executor.calls();
    assert_eq!(
        calls[0].0,
        "SELECT id FROM users WHERE login = ? OR email = ?"
    );
    assert_eq!(calls[0].1, vec![Value::from("alice"), Value::from("alice")]);
    Ok(())
}

#[tokio::test]
async fn closures_are_accessors_too() -> QbResult<()> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    let page = Arc::new(AtomicI64::new(1));
    let mut q = QueryBuilder::new(Backend::Oracle.dialect());
    let reader = Arc::clone(&page);
    let p = q.bind_param(move || reader.load(Ordering::SeqCst));
    q.select(["id"])?
        .from(["t"])?
        .where_([Expr::eq("page", p)])?;
    let stmt = q.prepare()?;
    assert_eq!(stmt.sql(), "SELECT id FROM t WHERE page = :p1");

    let executor = RecordingExecutor::default();
    for n in 1..=3 {
        page.store(n, Ordering::SeqCst);
        stmt.execute(&executor).await?;
    }
    let seen: Vec<Value> = executor.calls().into_iter().flat_map(|(_, v)| v).collect();
    assert_eq!(seen, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    Ok(())
}
