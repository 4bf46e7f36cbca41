//! `DieselPatientRepository` against embedded PostgreSQL.

use clinic_backend::domain::ports::PatientRepository;
use clinic_backend::domain::{PatientDraft, PatientOrder, PatientSearch};
use clinic_backend::outbound::persistence::DieselPatientRepository;
use rstest::{fixture, rstest};

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::Database;

#[fixture]
fn db() -> Option<Database> {
    pg_embed::database()
}

fn draft(name: &str, age: i32, heart_rate: i32) -> PatientDraft {
    PatientDraft::try_new(name, age, heart_rate).expect("valid draft")
}

fn seed(db: &Database, repo: &DieselPatientRepository, rows: &[(&str, i32, i32)]) {
    db.runtime.block_on(async {
        for (name, age, heart_rate) in rows {
            repo.create(&draft(name, *age, *heart_rate))
                .await
                .expect("insert patient");
        }
    });
}

#[rstest]
#[case("%", &["100% real"])]
#[case("_", &["a_b"])]
#[case("\\", &["back\\slash"])]
#[case("real", &["100% real", "100 real"])]
fn name_filter_matches_wildcards_literally(
    db: Option<Database>,
    #[case] needle: &str,
    #[case] expected: &[&str],
) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: name_filter_matches_wildcards_literally skipped");
        return;
    };
    let repo = DieselPatientRepository::new(db.pool.clone());
    seed(
        &db,
        &repo,
        &[
            ("100% real", 30, 70),
            ("100 real", 31, 71),
            ("a_b", 32, 72),
            ("axb", 33, 73),
            ("back\\slash", 34, 74),
            ("backslash", 35, 75),
        ],
    );

    let search = PatientSearch::new(Some(needle.to_owned()), None);
    let hits = db
        .runtime
        .block_on(repo.search(&search, None))
        .expect("search");

    let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[rstest]
fn heart_rate_ties_fall_back_to_ascending_id(db: Option<Database>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: heart_rate_ties_fall_back_to_ascending_id skipped");
        return;
    };
    let repo = DieselPatientRepository::new(db.pool.clone());
    seed(
        &db,
        &repo,
        &[("Ana", 30, 80), ("Beto", 40, 90), ("Carla", 50, 80), ("Dario", 60, 90)],
    );

    let rows = db
        .runtime
        .block_on(repo.list(PatientOrder::HeartRateDescending))
        .expect("list");

    let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Beto", "Dario", "Ana", "Carla"]);
    assert!(rows[0].id < rows[1].id);
    assert!(rows[2].id < rows[3].id);
}

#[rstest]
fn large_import_spans_several_statements(db: Option<Database>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: large_import_spans_several_statements skipped");
        return;
    };
    let repo = DieselPatientRepository::new(db.pool.clone());
    // Three bind parameters per row: 25,000 rows would overflow one statement.
    let drafts: Vec<PatientDraft> = (0..25_000)
        .map(|i| draft(&format!("Paciente {i}"), i % 100, 60 + i % 40))
        .collect();

    let inserted = db
        .runtime
        .block_on(repo.insert_batch(&drafts))
        .expect("batch insert");

    assert_eq!(inserted, 25_000);
    assert_eq!(db.count("pacientes"), 25_000);
}

#[rstest]
fn failed_import_leaves_no_rows_behind(db: Option<Database>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: failed_import_leaves_no_rows_behind skipped");
        return;
    };
    let repo = DieselPatientRepository::new(db.pool.clone());
    seed(&db, &repo, &[("Existente", 40, 70)]);
    // PostgreSQL text cannot hold NUL, so the last row fails after earlier
    // statements in the same transaction have succeeded.
    let mut drafts: Vec<PatientDraft> = (0..10_500)
        .map(|i| draft(&format!("Paciente {i}"), 30, 70))
        .collect();
    drafts.push(draft("Roto\0", 30, 70));

    let result = db.runtime.block_on(repo.insert_batch(&drafts));

    assert!(result.is_err(), "batch with an unstorable row should fail");
    assert_eq!(db.count("pacientes"), 1);
}
