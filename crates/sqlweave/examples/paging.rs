//! Render the same paged report for every backend.
//!
//! Run with: cargo run --example paging -p sqlweave

use sqlweave::{Backend, Expr, Order, QbResult, QueryBuilder};

fn report(q: &mut QueryBuilder, page: i64) -> QbResult<String> {
    q.select([
        Expr::col("company"),
        Expr::alias(Expr::func(sqlweave::Func::Sum, ["employees"]), "total"),
    ])?
    .from(["query_test"])?
    .where_([Expr::gt("employees", 0)])?
    .group_by(["company"])?
    .order_by("company", Order::Desc)?
    .paginate(page, 5)?;
    q.build()
}

fn main() -> QbResult<()> {
    for backend in [
        Backend::Standard,
        Backend::Postgres,
        Backend::MySql,
        Backend::Sqlite,
        Backend::Oracle,
    ] {
        let mut q = QueryBuilder::new(backend.dialect());
        println!("=== {backend} ===");
        for page in 1..=2 {
            println!("page {page}: {}", report(&mut q, page)?);
            q.reset();
        }
        println!();
    }
    Ok(())
}
