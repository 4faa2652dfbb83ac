//! Static fixture records.
//!
//! Every builder returns fresh owned values, so callers may mutate what
//! they receive without affecting later calls. Timestamps relative to
//! "now" are taken from the `now` argument where one exists.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::alerts::Alert;
use crate::dates::{DatePlan, DateType};
use crate::growth::GrowthGoal;
use crate::message::{ConversationSummary, Message, MessageId, Sender};
use crate::profile::{Gender, IcebreakerAnswer, Profile, ProfileId};

const PHOTO_BASE: &str = "https://images.unsplash.com/";
const PHOTO_PARAMS: &str = "?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60";

fn photo(id: &str) -> String {
    format!("{PHOTO_BASE}{id}{PHOTO_PARAMS}")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The three answered prompts shared by every fixture profile.
#[must_use]
pub fn icebreaker_answers() -> Vec<IcebreakerAnswer> {
    vec![
        IcebreakerAnswer::new(
            "If you could have dinner with any historical figure, who would it be and why?",
            "I'd love to have dinner with Leonardo da Vinci. His curiosity and diverse interests in art, science, and engineering are truly inspiring. I'd ask him about his creative process and how he balanced his various pursuits.",
        ),
        IcebreakerAnswer::new(
            "What's the most adventurous thing you've ever done?",
            "I once went on a solo backpacking trip through Southeast Asia for three months. It was challenging but incredibly rewarding to navigate new cultures and experiences on my own.",
        ),
        IcebreakerAnswer::new(
            "If you could instantly become an expert in one subject, what would it be?",
            "I'd love to become an expert in astrophysics. The mysteries of the universe fascinate me, and I'd love to contribute to our understanding of cosmic phenomena.",
        ),
    ]
}

/// Seed growth goals.
#[must_use]
pub fn growth_goals() -> Vec<GrowthGoal> {
    vec![
        GrowthGoal::new(1, "Learn a new language", "Become conversational in Spanish", 60),
        GrowthGoal::new(2, "Improve fitness", "Run a half marathon", 40),
        GrowthGoal::new(3, "Develop a new skill", "Learn to play the guitar", 25),
    ]
}

/// The discoverable profiles, ids assigned by position.
#[must_use]
pub fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: ProfileId(1),
            name: "Sarah Smith".to_string(),
            age: 26,
            gender: Gender::Female,
            location: "Los Angeles, CA".to_string(),
            bio: "Adventure seeker and coffee enthusiast. Let's explore the world together!".to_string(),
            photos: vec![
                photo("photo-1494790108377-be9c29b29330"),
                photo("photo-1517841905240-472988babdf9"),
                photo("photo-1522075469751-3a6694fb2f61"),
            ],
            interests: strings(&["Travel", "Photography", "Yoga"]),
            values: strings(&["Authenticity", "Growth", "Kindness"]),
            hotness_score: 92,
            premium: false,
            icebreaker_answers: icebreaker_answers(),
            growth_goals: growth_goals(),
            likes: 150,
            matches: 30,
        },
        Profile {
            id: ProfileId(2),
            name: "Mike Johnson".to_string(),
            age: 29,
            gender: Gender::Male,
            location: "New York, NY".to_string(),
            bio: "Tech enthusiast and foodie. Always up for trying new restaurants!".to_string(),
            photos: vec![
                photo("photo-1500648767791-00dcc994a43e"),
                photo("photo-1506794778202-cad84cf45f1d"),
                photo("photo-1519085360753-af0119f7cbe7"),
            ],
            interests: strings(&["Technology", "Cooking", "Hiking"]),
            values: strings(&["Innovation", "Honesty", "Adventure"]),
            hotness_score: 88,
            premium: true,
            icebreaker_answers: icebreaker_answers(),
            growth_goals: growth_goals(),
            likes: 120,
            matches: 25,
        },
        Profile {
            id: ProfileId(3),
            name: "Emily Chen".to_string(),
            age: 24,
            gender: Gender::Female,
            location: "San Francisco, CA".to_string(),
            bio: "Artist and nature lover. Looking for someone to share creative adventures with!".to_string(),
            photos: vec![
                photo("photo-1517365830460-955ce3ccd263"),
                photo("photo-1513721032312-6a18a42c8763"),
                photo("photo-1511485977113-f34c92461ad9"),
            ],
            interests: strings(&["Painting", "Hiking", "Meditation"]),
            values: strings(&["Creativity", "Sustainability", "Personal Growth"]),
            hotness_score: 95,
            premium: true,
            icebreaker_answers: icebreaker_answers(),
            growth_goals: growth_goals(),
            likes: 180,
            matches: 40,
        },
    ]
}

/// The canned thread shown for any selected conversation.
#[must_use]
pub fn messages(now: DateTime<Utc>) -> Vec<Message> {
    let thread = [
        ("Sarah", "Hey, how are you?", 3_600),
        ("You", "I'm doing great, thanks! How about you?", 3_500),
        ("Sarah", "I'm good too! Any plans for the weekend?", 3_400),
    ];
    thread
        .iter()
        .zip(1u64..)
        .map(|(&(sender, content, secs_ago), id)| Message {
            id: MessageId(id),
            sender: if sender == "You" { Sender::You } else { Sender::peer(sender) },
            content: content.to_string(),
            timestamp: now - Duration::seconds(secs_ago),
        })
        .collect()
}

/// The conversation list.
#[must_use]
pub fn conversations() -> Vec<ConversationSummary> {
    vec![
        ConversationSummary::new(1, "Sarah", "Hey, how are you?", 2),
        ConversationSummary::new(2, "Mike", "Want to grab coffee sometime?", 0),
        ConversationSummary::new(3, "Emily", "That sounds great!", 1),
    ]
}

/// Dates already on the calendar.
#[must_use]
pub fn planned_dates() -> Vec<DatePlan> {
    let plan = |id, (y, m, d), time: &str, date_type, activity: &str, partner: &str| DatePlan {
        id,
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        time: time.to_string(),
        date_type,
        activity: activity.to_string(),
        partner: partner.to_string(),
    };
    vec![
        plan(1, (2023, 5, 15), "19:00", DateType::Virtual, "Virtual Movie Night", "Sarah"),
        plan(2, (2023, 5, 18), "20:00", DateType::Physical, "Coffee Shop Meet", "Mike"),
    ]
}

/// The icebreaker question catalog.
#[must_use]
pub fn icebreaker_questions() -> Vec<&'static str> {
    vec![
        "If you could have dinner with any historical figure, who would it be and why?",
        "What's the most adventurous thing you've ever done?",
        "If you could instantly become an expert in one subject, what would it be?",
        "What's your favorite childhood memory?",
        "If you could travel anywhere in the world right now, where would you go?",
        "What's a skill you'd like to learn or improve?",
        "What's the best piece of advice you've ever received?",
        "If you could have any superpower, what would it be and why?",
        "What's a book or movie that has significantly impacted your life?",
        "If you could switch lives with anyone for a day, who would it be?",
    ]
}

/// Seed FOMO alerts.
#[must_use]
pub fn alerts() -> Vec<Alert> {
    vec![
        Alert::new(1, "You've dropped 5 spots in the local leaderboard! Boost your profile now!"),
        Alert::new(2, "3 new hotties in your area! Don't miss out on potential matches!"),
        Alert::new(3, "Your match rate is lower than usual. Update your profile to stand out!"),
    ]
}

/// Opening lines offered by the AI DM blast, with `[slot]` placeholders.
#[must_use]
pub fn dm_blast_templates() -> Vec<&'static str> {
    vec![
        "Hey there! I noticed we have [shared interest] in common. What's your favorite aspect of it?",
        "Your profile caught my eye! I'm curious, what's the story behind your [interesting photo/detail]?",
        "Hi! If you could travel anywhere in the world right now, where would you go and why?",
        "Hello! I'm intrigued by your [hobby/interest]. What got you started with that?",
        "Hey! If you could have dinner with any historical figure, who would it be and why?",
    ]
}
