use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use faresql::{AccessConfig, ParameterSubstitutor, SqlStatement};

/// Template with `n` scalar placeholders:
/// `select * from FARERULE where COL0 = %1 and COL1 = %2 ...`
fn build_template(n: usize) -> String {
    let mut sql = String::from("select * from FARERULE where ");
    for i in 0..n {
        if i > 0 {
            sql.push_str(" and ");
        }
        sql.push_str(&format!("COL{i} = %{}", i + 1));
    }
    sql
}

fn bench_scalar_substitution(c: &mut Criterion) {
    let cfg = AccessConfig::default();
    let mut group = c.benchmark_group("substitutor/scalar");

    for n in [1, 5, 10, 50] {
        let template = build_template(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &template, |b, template| {
            b.iter(|| {
                let mut sql = template.clone();
                let mut sub = ParameterSubstitutor::new(cfg.dialect());
                for i in 0..n {
                    sub.substitute(&mut sql, i as i64, (i + 1) as u32, false)
                        .unwrap();
                }
                black_box(sql);
            });
        });
    }

    group.finish();
}

fn bench_carrier_list(c: &mut Criterion) {
    let cfg = AccessConfig::default();
    let mut group = c.benchmark_group("substitutor/carrier_list");

    for n in [2usize, 10, 100, 500] {
        let carriers: Vec<String> = (0..n).map(|i| format!("C{i:03}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &carriers, |b, carriers| {
            let refs: Vec<&str> = carriers.iter().map(String::as_str).collect();
            b.iter(|| {
                let mut sql = String::from("select * from FARERULE where CARRIER %1");
                let mut sub = ParameterSubstitutor::new(cfg.dialect());
                sub.substitute_carrier_list(&mut sql, &refs, 1).unwrap();
                black_box(sql);
            });
        });
    }

    group.finish();
}

fn bench_sql_string_audit(c: &mut Criterion) {
    let cfg = AccessConfig::default();
    let mut group = c.benchmark_group("substitutor/sql_string");

    for n in [5usize, 20, 50] {
        let template = build_template(n);
        let mut sql = template.clone();
        let mut sub = ParameterSubstitutor::new(cfg.dialect());
        for i in 0..n {
            sub.substitute(&mut sql, i as i64, (i + 1) as u32, false)
                .unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(sub.sql_string(sql)));
        });
    }

    group.finish();
}

fn bench_construct_statement(c: &mut Criterion) {
    let oracle = AccessConfig::oracle();
    let generic = AccessConfig::default();

    let mut stmt = SqlStatement::new();
    stmt.command("select CARRIER, RULE, SEQNO")
        .from("FARERULE r, FARECLASS c")
        .where_clause("r.CARRIER = c.CARRIER and r.RULE = %1")
        .limit(100);

    let mut group = c.benchmark_group("statement/construct");
    group.bench_function("generic", |b| {
        b.iter(|| black_box(stmt.construct_sql(generic.dialect()).unwrap()));
    });
    group.bench_function("oracle_rownum", |b| {
        b.iter(|| black_box(stmt.construct_sql(oracle.dialect()).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_substitution,
    bench_carrier_list,
    bench_sql_string_audit,
    bench_construct_statement
);
criterion_main!(benches);
