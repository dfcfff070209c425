use rescue_dashboard::db::{Database, RecordStore};
use rescue_dashboard::models::*;
use rescue_dashboard::query;
use speculate2::speculate;

fn animal(name: &str, breed: &str, sex: &str, weeks: f64) -> AnimalRecord {
    AnimalRecord {
        rec_num: None,
        animal_id: format!("A{}", name.len() * 1000),
        animal_type: "Dog".to_string(),
        breed: breed.to_string(),
        color: Some("Black/White".to_string()),
        name: name.to_string(),
        sex_upon_outcome: sex.to_string(),
        age_upon_outcome: None,
        age_upon_outcome_in_weeks: weeks,
        date_of_birth: None,
        datetime: None,
        monthyear: None,
        outcome_type: Some("Adoption".to_string()),
        outcome_subtype: None,
        location_lat: Some(30.5),
        location_long: Some(-97.5),
    }
}

fn seed(db: &Database) -> Vec<StoredRecord> {
    db.insert_records(vec![
        animal("Luna", "Newfoundland", "Intact Female", 26.0),
        animal("Max", "Rottweiler", "Intact Male", 156.0),
        animal("Bella", "Labrador Retriever Mix", "Intact Female", 157.0),
        animal("Rocky", "Bloodhound", "Intact Male", 20.0),
        animal("Daisy", "Chesapeake Bay Retriever", "Spayed Female", 60.0),
        animal("Duke", "German Shepherd", "Intact Male", 300.0),
    ])
    .expect("Failed to seed records")
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "insert_records" {
        it "assigns a distinct identifier to every record" {
            let stored = seed(&db);
            assert_eq!(stored.len(), 6);

            let mut ids: Vec<_> = stored.iter().map(|s| s.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 6);
            assert_eq!(db.count_records().expect("Count failed"), 6);
        }

        it "stores nothing when the batch is empty" {
            let stored = db.insert_records(vec![]).expect("Insert failed");
            assert!(stored.is_empty());
            assert_eq!(db.count_records().expect("Count failed"), 0);
        }
    }

    describe "read" {
        it "returns the whole collection for the empty predicate" {
            seed(&db);
            let all = db.read(&FilterPredicate::match_all()).expect("Read failed");
            assert_eq!(all.len(), 6);
        }

        it "returns records in insertion order" {
            seed(&db);
            let names: Vec<String> = db
                .read(&FilterPredicate::match_all())
                .expect("Read failed")
                .into_iter()
                .map(|s| s.record.name)
                .collect();
            assert_eq!(names, vec!["Luna", "Max", "Bella", "Rocky", "Daisy", "Duke"]);
        }

        it "returns an empty list from an empty store" {
            let all = db.read(&FilterPredicate::match_all()).expect("Read failed");
            assert!(all.is_empty());
        }

        it "round-trips every column" {
            let mut record = animal("Pepper", "Bloodhound", "Intact Male", 52.0);
            record.rec_num = Some(42);
            record.date_of_birth = Some("2015-06-01".to_string());
            record.location_long = None;
            db.insert_record(record.clone()).expect("Insert failed");

            let read = db.read(&FilterPredicate::match_all()).expect("Read failed");
            assert_eq!(read.len(), 1);
            assert_eq!(read[0].record, record);
        }

        it "applies the water rescue predicate with inclusive bounds" {
            seed(&db);
            let water = db.read(&query::build(Selector::Water)).expect("Read failed");
            let names: Vec<&str> = water.iter().map(|s| s.record.name.as_str()).collect();
            assert_eq!(names, vec!["Luna"]);
        }

        it "applies the mountain rescue predicate" {
            seed(&db);
            let mountain = db.read(&query::build(Selector::Mountain)).expect("Read failed");
            let names: Vec<&str> = mountain.iter().map(|s| s.record.name.as_str()).collect();
            assert_eq!(names, vec!["Max"]);
        }

        it "applies the disaster rescue predicate" {
            seed(&db);
            let disaster = db.read(&query::build(Selector::Disaster)).expect("Read failed");
            let names: Vec<&str> = disaster.iter().map(|s| s.record.name.as_str()).collect();
            assert_eq!(names, vec!["Max", "Rocky", "Duke"]);
        }

        it "never returns a record violating the predicate" {
            seed(&db);
            for selector in Selector::ALL {
                let predicate = query::build(selector);
                let records = db.read(&predicate).expect("Read failed");
                assert!(records.iter().all(|s| predicate.matches(&s.record)));
            }
        }

        it "agrees with in-process predicate evaluation" {
            let stored = seed(&db);
            for selector in Selector::ALL {
                let predicate = query::build(selector);
                let expected: Vec<_> = stored
                    .iter()
                    .filter(|s| predicate.matches(&s.record))
                    .cloned()
                    .collect();
                assert_eq!(db.read(&predicate).expect("Read failed"), expected);
            }
        }

        it "treats an empty breed set as matching nothing" {
            seed(&db);
            let predicate = FilterPredicate::match_all().with(Clause::OneOf {
                field: TextField::Breed,
                values: vec![],
            });
            assert!(db.read(&predicate).expect("Read failed").is_empty());
        }

        it "filters on optional columns" {
            let mut stray = animal("Ghost", "Bloodhound", "Intact Male", 40.0);
            stray.location_lat = None;
            db.insert_record(stray).expect("Insert failed");
            db.insert_record(animal("Scout", "Bloodhound", "Intact Male", 40.0)).expect("Insert failed");

            let predicate = FilterPredicate::match_all().with(Clause::Between {
                field: NumericField::LocationLat,
                min: 30.0,
                max: 31.0,
            });
            let located = db.read(&predicate).expect("Read failed");
            assert_eq!(located.len(), 1);
            assert_eq!(located[0].record.name, "Scout");
        }
    }

    describe "open" {
        it "persists records across connections" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("shelter.db");

            {
                let disk = Database::open(path.clone()).expect("Failed to open database");
                disk.migrate().expect("Failed to migrate");
                seed(&disk);
            }

            let reopened = Database::open(path).expect("Failed to reopen database");
            reopened.migrate().expect("Migrations should be idempotent");
            assert_eq!(reopened.count_records().expect("Count failed"), 6);
        }
    }
}
