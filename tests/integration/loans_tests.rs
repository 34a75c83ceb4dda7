//! Borrow and return against a loaded library

use library_store::{
    config::LendingConfig,
    models::ItemStatus,
    services::{
        loans::{BorrowOutcome, BorrowRefusal, ReturnOutcome},
        Services,
    },
};

use crate::{read, repository_in, scratch_dir, write};

fn fixture() -> std::path::PathBuf {
    let dir = scratch_dir();
    write(
        &dir,
        "members.txt",
        &[
            "S&Ali&Sidon&M&19&70-111111&1",
            "C&Hiba&Tripoli&F&45&+961-03-222222&2&10",
        ],
    );
    write(
        &dir,
        "items.txt",
        &[
            "B#11#One#A#P#a#misc#1700000000000#100",
            "B#12#Two#A#P#a#misc#1700000000000#100",
            "B#13#Three#A#P#a#misc#1700000000000#100",
            "D#14#Four#A#P#a#film#1700000000000#700",
        ],
    );
    dir
}

#[test]
fn test_student_ceiling_after_load() {
    let dir = fixture();
    let services = Services::new(&LendingConfig::default());
    let mut library = repository_in(&dir).load().expect("Failed to load");

    for serial in [11, 12, 13] {
        assert!(services.loans.borrow(&mut library, "1", serial).expect("borrow").is_borrowed());
    }
    let outcome = services.loans.borrow(&mut library, "1", 14).expect("borrow");
    assert_eq!(
        BorrowOutcome::Refused(BorrowRefusal::CeilingReached { ceiling: 3 }),
        outcome
    );
    assert_eq!(ItemStatus::Available, library.find_item_by_serial(14).expect("item").status());
    assert_eq!(3, library.find_member_by_id("1").expect("member").borrowed().len());
}

#[test]
fn test_civilian_balance_gates_borrowing() {
    let dir = fixture();
    let services = Services::new(&LendingConfig::default());
    let mut library = repository_in(&dir).load().expect("Failed to load");

    let refused = services.loans.borrow(&mut library, "2", 11).expect("borrow");
    assert!(!refused.is_borrowed());
    assert_eq!(Some(10.0), library.find_member_by_id("2").expect("member").balance());

    library.find_member_by_id_mut("2").expect("member").add_credit(5.0);
    let borrowed = services.loans.borrow(&mut library, "2", 14).expect("borrow");
    assert!(borrowed.is_borrowed());
    assert_eq!(Some(0.0), library.find_member_by_id("2").expect("member").balance());
}

#[test]
fn test_history_grows_across_loans() {
    let dir = fixture();
    let services = Services::new(&LendingConfig::default());
    let repository = repository_in(&dir);
    let mut library = repository.load().expect("Failed to load");

    services.loans.borrow(&mut library, "1", 11).expect("borrow");
    assert_eq!(
        ReturnOutcome::Returned,
        services.loans.return_item(&mut library, "1", 11).expect("return")
    );
    library.find_member_by_id_mut("2").expect("member").add_credit(20.0);
    services.loans.borrow(&mut library, "2", 11).expect("borrow");
    assert_eq!(
        ReturnOutcome::NotHeld,
        services.loans.return_item(&mut library, "1", 11).expect("return")
    );

    repository.save(&library).expect("Failed to save");
    let reloaded = repository.load().expect("Failed to reload");
    let item = reloaded.find_item_by_serial(11).expect("item");
    assert_eq!(vec!["1".to_string(), "2".to_string()], item.past_owners());
    assert_eq!(Some("2"), item.current_borrower());
    assert!(reloaded.loan_inconsistencies().is_empty());
}

#[test]
fn test_spent_balance_survives_save_and_reload() {
    let dir = fixture();
    let services = Services::new(&LendingConfig::default());
    let repository = repository_in(&dir);
    let mut library = repository.load().expect("Failed to load");

    library.find_member_by_id_mut("2").expect("member").add_credit(5.0);
    assert!(services.loans.borrow(&mut library, "2", 14).expect("borrow").is_borrowed());
    assert_eq!(Some(0.0), library.find_member_by_id("2").expect("member").balance());

    repository.save(&library).expect("Failed to save");
    let members = read(&dir, "members.txt");
    let reloaded = repository.load().expect("Failed to reload");
    assert_eq!(Some(0.0), reloaded.find_member_by_id("2").expect("member").balance());

    repository.save(&reloaded).expect("Failed to save again");
    assert_eq!(members, read(&dir, "members.txt"));
    let refused = services.loans.borrow(&mut library, "2", 12).expect("borrow");
    assert!(!refused.is_borrowed());
}
