//! Load/save behaviour of the two record files

use library_store::{
    config::LendingConfig,
    models::{
        ItemDetails, ItemKind, ItemStatus, MemberDetails, MemberKind, RecordFile, ReferenceKind,
    },
    services::Services,
};

use crate::{read, repository_in, scratch_dir, write};

#[test]
fn test_missing_files_mean_empty_library() {
    let dir = scratch_dir();
    let library = repository_in(&dir).load().expect("Failed to load");
    assert_eq!(0, library.member_count());
    assert_eq!(0, library.item_count());
}

#[test]
fn test_malformed_member_line_is_skipped() {
    let dir = scratch_dir();
    write(
        &dir,
        "members.txt",
        &[
            "S&Ali&Sidon&M&19&70-111111&1",
            "C&Hiba&Tripoli&F&45&+961-03-222222&2&80.5",
            "C&Broken&Zahle&F&not-an-age&03-333333&3&20",
            "S&Omar&Jounieh&M&23&71-444444&4",
            "",
            "C&Yara&Baalbek&F&61&76-555555&5&15",
        ],
    );

    let (library, report) = repository_in(&dir)
        .load_with_report()
        .expect("Failed to load");

    assert_eq!(4, library.member_count());
    assert_eq!(4, report.members_loaded);
    assert!(library.find_member_by_id("3").is_none());
    assert_eq!(1, report.skipped_lines.len());
    assert_eq!(RecordFile::Members, report.skipped_lines[0].file);
    assert_eq!(3, report.skipped_lines[0].line_number);
    let ids: Vec<_> = library.members().map(|m| m.id().to_string()).collect();
    assert_eq!(vec!["1", "2", "4", "5"], ids);
}

#[test]
fn test_unknown_past_owner_is_omitted() {
    let dir = scratch_dir();
    write(&dir, "members.txt", &["S&Ali&Sidon&M&19&70-111111&1"]);
    write(
        &dir,
        "items.txt",
        &[concat!(
            "B#40101010101#Season of Migration#Tayeb Salih#Heinemann#a#novel",
            "#1700000000000#169#1&&ghost&&1"
        )],
    );

    let (library, report) = repository_in(&dir)
        .load_with_report()
        .expect("Failed to load");

    let item = library.find_item_by_serial(40101010101).expect("item loaded");
    assert_eq!(vec!["1".to_string(), "1".to_string()], item.past_owners());
    assert_eq!(1, report.dangling_references.len());
    assert_eq!(ReferenceKind::PastOwner, report.dangling_references[0].kind);
    assert_eq!("ghost", report.dangling_references[0].reference);
}

#[test]
fn test_loans_survive_a_reload() {
    let dir = scratch_dir();
    let repository = repository_in(&dir);
    let services = Services::new(&LendingConfig::default());
    let mut library = repository.load().expect("Failed to load");

    services
        .catalog
        .add_member(
            &mut library,
            "S-1",
            MemberDetails {
                name: "Ali".to_string(),
                address: "Sidon".to_string(),
                gender: 'M',
                age: 19,
                phone_number: "70-111111".to_string(),
            },
            MemberKind::Student,
        )
        .expect("Failed to add member");
    let serial = services
        .catalog
        .add_item(
            &mut library,
            ItemDetails {
                title: "Season of Migration to the North".to_string(),
                author: "Tayeb Salih".to_string(),
                publisher: "Heinemann".to_string(),
                genre: "novel".to_string(),
            },
            ItemKind::book(169),
            'a',
        )
        .expect("Failed to add item");
    services
        .loans
        .borrow(&mut library, "S-1", serial)
        .expect("Failed to borrow");
    repository.save(&library).expect("Failed to save");

    let reloaded = repository.load().expect("Failed to reload");
    let item = reloaded.find_item_by_serial(serial).expect("item reloaded");
    assert_eq!(ItemStatus::OnLoan, item.status());
    assert_eq!(Some("S-1"), item.current_borrower());
    assert_eq!(&[serial], reloaded.find_member_by_id("S-1").expect("member reloaded").borrowed());
    assert!(reloaded.loan_inconsistencies().is_empty());
    assert_eq!(library.find_item_by_serial(serial), Some(item));
}

#[test]
fn test_save_load_save_is_byte_identical() {
    let dir = scratch_dir();
    write(
        &dir,
        "members.txt",
        &[
            "C&Hiba \\& Co&Tripoli&F&45&+961-03-222222&2&80.5&50101010102",
            "S&Ali&Sidon&M&19&70-111111&1",
        ],
    );
    write(
        &dir,
        "items.txt",
        &[
            "D#50101010101#Caramel#Nadine Labaki#Les Films\\#1#a#film#1700000000000#4300.5#1",
            "B#50101010102#C\\\\D \\&\\& more#Author#Pub#o#essay#1700000000001#120#1&&2",
        ],
    );
    let repository = repository_in(&dir);

    let first = repository.load().expect("Failed to load");
    repository.save(&first).expect("Failed to save");
    let members = read(&dir, "members.txt");
    let items = read(&dir, "items.txt");

    let second = repository.load().expect("Failed to reload");
    repository.save(&second).expect("Failed to save again");
    assert_eq!(members, read(&dir, "members.txt"));
    assert_eq!(items, read(&dir, "items.txt"));

    let member = second.find_member_by_id("2").expect("member reloaded");
    assert_eq!("Hiba & Co", member.name);
    assert_eq!(&[50101010102], member.borrowed());
    let dvd = second.find_item_by_serial(50101010101).expect("dvd reloaded");
    assert_eq!("Les Films#1", dvd.publisher);
    let book = second.find_item_by_serial(50101010102).expect("book reloaded");
    assert_eq!("C\\D && more", book.title);
    assert_eq!(Some("2"), book.current_borrower());
}

#[test]
fn test_rewrite_normalises_clamped_values() {
    let dir = scratch_dir();
    write(&dir, "members.txt", &["C&Old&Addr&q&12&bad&9&-3"]);
    write(&dir, "items.txt", &["B#7#Thin#A#P#X#misc#1700000000000#4"]);
    let repository = repository_in(&dir);

    let library = repository.load().expect("Failed to load");
    repository.save(&library).expect("Failed to save");

    assert_eq!("C&Old&Addr&M&18&00-000000&9&50\n", read(&dir, "members.txt"));
    assert_eq!("B#7#Thin#A#P#a#misc#1700000000000#20\n", read(&dir, "items.txt"));
}

#[test]
fn test_line_breaks_in_text_survive_a_reload() {
    let dir = scratch_dir();
    let repository = repository_in(&dir);
    let services = Services::new(&LendingConfig::default());
    let mut library = repository.load().expect("Failed to load");

    services
        .catalog
        .add_member(
            &mut library,
            "S-1",
            MemberDetails {
                name: "Ali".to_string(),
                address: "Flat 3\r\nSidon".to_string(),
                gender: 'M',
                age: 19,
                phone_number: "70-111111".to_string(),
            },
            MemberKind::Student,
        )
        .expect("Failed to add member");
    let serial = services
        .catalog
        .add_item(
            &mut library,
            ItemDetails {
                title: "Line\nTwo".to_string(),
                author: "Author".to_string(),
                publisher: "Pub".to_string(),
                genre: "poetry".to_string(),
            },
            ItemKind::book(80),
            'a',
        )
        .expect("Failed to add item");
    repository.save(&library).expect("Failed to save");
    assert_eq!(1, read(&dir, "items.txt").lines().count());
    assert_eq!(1, read(&dir, "members.txt").lines().count());

    let (reloaded, report) = repository.load_with_report().expect("Failed to reload");
    assert!(report.is_clean());
    assert_eq!("Line\nTwo", reloaded.find_item_by_serial(serial).expect("item").title);
    assert_eq!("Flat 3\r\nSidon", reloaded.find_member_by_id("S-1").expect("member").address);
}
