use lifematrix_core::{seed_collection, RatingEdit, RatingField};

#[test]
fn edit_changes_only_the_target_field_of_the_target_record() {
    let seed = seed_collection();
    let edit = RatingEdit::new(RatingField::Importance, 9).unwrap();

    let edited = seed.apply_edit("3", edit);

    assert_eq!(edited.len(), seed.len());
    let target = edited.get("3").unwrap();
    assert_eq!(target.importance(), 9);
    assert_eq!(target.satisfaction(), 5);
    assert_eq!(target.time_spent(), 1);
    assert_eq!(target.label(), "Health & Fitness");

    for (before, after) in seed.iter().zip(edited.iter()) {
        assert_eq!(before.id(), after.id(), "order must be preserved");
        if after.id() != "3" {
            assert_eq!(before, after, "record {} must be unchanged", after.id());
        }
    }
}

#[test]
fn edit_leaves_the_input_revision_untouched() {
    let seed = seed_collection();
    let snapshot = seed.clone();

    let _ = seed.apply_edit("1", RatingEdit::new(RatingField::TimeSpent, 20).unwrap());

    assert_eq!(seed, snapshot);
}

#[test]
fn edit_with_unknown_id_is_a_value_equal_noop() {
    let seed = seed_collection();

    for field in RatingField::ALL {
        let edited = seed.apply_edit("missing", RatingEdit::clamped(field, 7));
        assert_eq!(edited, seed);
    }
}

#[test]
fn each_field_is_independently_editable() {
    let seed = seed_collection();

    let edited = seed
        .apply_edit("5", RatingEdit::new(RatingField::Importance, 10).unwrap())
        .apply_edit("5", RatingEdit::new(RatingField::Satisfaction, 2).unwrap())
        .apply_edit("5", RatingEdit::new(RatingField::TimeSpent, 40).unwrap());

    let record = edited.get("5").unwrap();
    assert_eq!(
        (record.importance(), record.satisfaction(), record.time_spent()),
        (10, 2, 40)
    );
}

#[test]
fn clamped_edits_keep_the_collection_in_range() {
    let seed = seed_collection();

    let edited = seed
        .apply_edit("2", RatingEdit::clamped(RatingField::Importance, 15))
        .apply_edit("2", RatingEdit::clamped(RatingField::TimeSpent, -3));

    let record = edited.get("2").unwrap();
    assert_eq!(record.importance(), 10);
    assert_eq!(record.time_spent(), 1);
    record.validate().unwrap();
}
