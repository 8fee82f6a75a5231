//! Default life areas loaded at session start.

use crate::model::collection::RatingCollection;
use crate::model::rating::{RatingRecord, HOURS_RANGE};

const SEED_AREAS: &[(&str, &str)] = &[
    (
        "Career & Work",
        "Professional growth, job satisfaction, workplace relationships, and career development goals.",
    ),
    (
        "Finance & Wealth",
        "Financial security, savings, investments, budgeting, and long-term financial planning.",
    ),
    (
        "Health & Fitness",
        "Physical well-being, exercise, nutrition, sleep quality, and preventive healthcare.",
    ),
    (
        "Mental & Emotional Well-being",
        "Psychological health, stress management, emotional intelligence, and mental resilience.",
    ),
    (
        "Relationships & Family",
        "Quality of personal relationships, family bonds, and social connections.",
    ),
    (
        "Personal Growth",
        "Self-improvement, learning new skills, and developing personal capabilities.",
    ),
    (
        "Spirituality & Faith",
        "Religious or spiritual practices, beliefs, and connection to higher purpose.",
    ),
    (
        "Recreation & Hobbies",
        "Leisure activities, creative pursuits, and enjoyable pastimes.",
    ),
    (
        "Home & Environment",
        "Living space, home maintenance, and creating a comfortable environment.",
    ),
    (
        "Community & Social Impact",
        "Contributing to society, volunteering, and making a positive difference.",
    ),
    (
        "Learning & Education",
        "Formal education, self-study, and intellectual development.",
    ),
    (
        "Travel & Adventure",
        "Exploring new places, experiencing different cultures, and creating memories.",
    ),
    (
        "Time Management",
        "Organization, productivity, and balance between different life areas.",
    ),
    (
        "Creative Expression",
        "Artistic pursuits, self-expression, and creative outlets.",
    ),
    (
        "Social Life & Friends",
        "Friendships, social activities, and building meaningful connections.",
    ),
    (
        "Life Vision & Purpose",
        "Long-term goals, personal mission, and sense of purpose.",
    ),
];

/// Returns the 16 default life areas with ids `"1"..="16"`.
///
/// Every area starts at importance 5, satisfaction 5 and one weekly hour.
pub fn seed_collection() -> RatingCollection {
    let records = SEED_AREAS
        .iter()
        .enumerate()
        .map(|(index, (label, description))| RatingRecord {
            id: (index + 1).to_string(),
            label: (*label).to_string(),
            description: (*description).to_string(),
            importance: 5,
            satisfaction: 5,
            time_spent: *HOURS_RANGE.start(),
        })
        .collect::<Vec<_>>();

    match RatingCollection::new(records) {
        Ok(collection) => collection,
        Err(err) => unreachable!("seed areas are static and id-unique: {err}"),
    }
}
