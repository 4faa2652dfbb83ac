//! Kindling demo
//!
//! Runs a scripted session against the seeded mock service and logs each step.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use kindling::logging::{init_logging, DEFAULT_DIRECTIVE};
use kindling::{
    spawn_alert_ticker, AlertFeed, AppSession, ConversationId, DatePlanDraft, DatePlanner,
    DateType, EliteHubView, ExploreView, GoalBook, HubView, IcebreakerGame, KindlingConfig,
    KindlingResult, LeaderboardView, MessagingView, MockService, Page, PersonalInfo,
    ProfileEditor, ProfileField, RandomJudge, RandomScores, ScoreSource, SettingsView,
    SubmitResult, Tier,
    User, VerificationForm, VerificationOutcome, VideoChatView,
};
use kindling::fixtures;

/// Exit code when the demo user fails verification.
const EXIT_REJECTED: i32 = 2;

/// Photos uploaded on the first verification step.
const DEMO_PHOTOS: [&str; 2] = ["selfie.jpg", "beach.jpg"];

/// Demo configuration
struct Config {
    /// Optional JSON config file
    config_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset
    log_directive: String,
    /// Tier to upgrade to after verification
    tier: Tier,
    /// Skip artificial delays
    instant: bool,
    /// Seed for verification scores; entropy when unset
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            log_directive: DEFAULT_DIRECTIVE.to_string(),
            tier: Tier::Premium,
            instant: false,
            seed: None,
        }
    }
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("error: --config requires a value");
                    std::process::exit(1);
                }
            }
            "--log" | "-l" => {
                if i + 1 < args.len() {
                    config.log_directive = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("error: --log requires a value");
                    std::process::exit(1);
                }
            }
            "--tier" | "-t" => {
                if i + 1 < args.len() {
                    config.tier = args[i + 1].parse().unwrap_or_else(|e| {
                        eprintln!("error: {e}");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("error: --tier requires a value");
                    std::process::exit(1);
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    config.seed = Some(args[i + 1].parse().unwrap_or_else(|e| {
                        eprintln!("error: invalid seed: {e}");
                        std::process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("error: --seed requires a value");
                    std::process::exit(1);
                }
            }
            "--instant" => {
                config.instant = true;
                i += 1;
            }
            "--help" | "-h" => {
                println!("kindling-demo - scripted Kindling session");
                println!();
                println!("USAGE:");
                println!("    kindling-demo [OPTIONS]");
                println!();
                println!("OPTIONS:");
                println!("    -c, --config <FILE>       JSON config file");
                println!("    -l, --log <DIRECTIVE>     Log filter [default: {DEFAULT_DIRECTIVE}]");
                println!("    -t, --tier <TIER>         Tier after verification [default: premium]");
                println!("    -s, --seed <N>            Seed for verification scores");
                println!("        --instant             Disable simulated latency");
                println!("    -h, --help                Print help information");
                std::process::exit(0);
            }
            arg => {
                eprintln!("error: unknown argument: {arg}");
                std::process::exit(1);
            }
        }
    }

    config
}

fn load_config(args: &Config) -> KindlingResult<KindlingConfig> {
    let mut config = match &args.config_path {
        Some(path) => KindlingConfig::load(path)?,
        None => KindlingConfig::default(),
    };
    if args.instant {
        config = KindlingConfig {
            verification_threshold: config.verification_threshold,
            negative_answer_penalty: config.negative_answer_penalty,
            alert_interval_secs: config.alert_interval_secs,
            ..KindlingConfig::instant()
        };
    }
    Ok(config)
}

/// Walks the verification form and applies the score to `session`.
///
/// Returns false, after logging the rejection message, when the user is
/// rejected. The session then stays locked.
fn verify(session: &mut AppSession, scores: &mut dyn ScoreSource) -> KindlingResult<bool> {
    let mut form = VerificationForm::new(session.threshold());
    form.add_photos(DEMO_PHOTOS);
    form.submit(scores)?;
    form.set_personal_info(PersonalInfo {
        name: "Alex".to_string(),
        birthdate: "1995-04-12".to_string(),
        gender: "non-binary".to_string(),
        interests: "Climbing, Jazz".to_string(),
        bio: "Weekend climber, weekday coder.".to_string(),
    });
    form.submit(scores)?;

    let SubmitResult::Completed(outcome) = form.submit(scores)? else {
        error!(step = ?form.step(), "verification did not finish");
        return Ok(false);
    };
    let outcome = session.apply_verification(outcome.score());
    if let VerificationOutcome::Rejected { score, message } = outcome {
        error!(score, %message, "verification rejected");
        return Ok(false);
    }
    Ok(true)
}

/// Runs the scripted session. Returns false when the user fails verification.
async fn run(args: Config) -> KindlingResult<bool> {
    let config = load_config(&args)?;
    let service = Arc::new(MockService::seeded(config.clone()));
    let mut rng = rand::thread_rng();
    let alerts = Arc::new(Mutex::new(AlertFeed::seeded()));
    let ticker = spawn_alert_ticker(Arc::clone(&alerts), config.alert_interval());

    // Verification
    let user = User::new("Alex")
        .with_photo("https://images.unsplash.com/photo-1494790108377-be9c29b29330");
    let mut session = AppSession::with_threshold(user, config.verification_threshold);
    let mut scores = match args.seed {
        Some(seed) => RandomScores::new(StdRng::seed_from_u64(seed)),
        None => RandomScores::from_entropy(),
    };
    if !verify(&mut session, &mut scores)? {
        ticker.abort();
        return Ok(false);
    }
    let photos_ok = service.verify_photos(&DEMO_PHOTOS.map(String::from)).await;
    info!(photos_ok, "photo check finished");
    session.upgrade(args.tier);
    session.navigate(Page::Explore);
    info!(page = %session.visible_page(), tier = %session.tier(), "session ready");

    // Explore
    let mut explore = ExploreView::new(Arc::clone(&service));
    let first = explore.load()?.name.clone();
    info!(profile = %first, "showing profile");
    explore.like().await?;
    match explore.super_like(session.tier()).await {
        Ok(next) => info!(next = %next.name, "super liked"),
        Err(e) if e.needs_upgrade() => warn!(error = %e, "super like locked"),
        Err(e) => return Err(e),
    }
    if let Ok(Some(back)) = explore.rewind(session.tier()) {
        info!(profile = %back.name, "rewound");
    }
    explore.reject().await?;

    // Messaging
    let mut messaging = MessagingView::new(Arc::clone(&service));
    messaging.load()?;
    messaging.select(ConversationId(1))?;
    let suggestions = messaging.suggestions().await?;
    if let Some(first) = suggestions.first() {
        messaging.apply_suggestion(first);
    }
    messaging.push_emoji(" \u{1F60A}");
    let sent = messaging.send_draft().await?;
    info!(id = %sent.id, content = %sent.content, "message sent");

    // Engage
    let mut game = IcebreakerGame::with_penalty(session.tier(), config.negative_answer_penalty);
    let mut judge = RandomJudge::new(rand::thread_rng());
    game.start(&mut rng);
    for answer in ["Tokyo, for the food", "Pancakes", "Learning to surf"] {
        if game.current_question().is_none() {
            break;
        }
        let feedback = game.submit(answer, &mut judge, &mut rng)?;
        info!(positive = feedback.positive, points = feedback.points, streak = feedback.streak, "icebreaker");
    }

    // Hub and leaderboard
    let hub = HubView::load(&service)?;
    match hub.likes(session.tier()) {
        Ok(likes) => info!(likes = likes.len(), matches = hub.matches().len(), "hub loaded"),
        Err(e) => warn!(error = %e, count = hub.like_count(), "likes hidden"),
    }
    let mut elite = EliteHubView::new(Arc::clone(&service));
    let opener = elite.suggestions(None).into_iter().next().unwrap_or_default();
    match elite.ai_dm_blast(session.tier(), 10, &opener).await {
        Ok(receipt) => info!(radius_km = receipt.radius_km, "dm blast sent"),
        Err(e) => warn!(error = %e, "dm blast locked"),
    }
    let board = LeaderboardView::load(&service)?;
    for (rank, profile) in board.rows() {
        info!(rank, name = %profile.name, score = profile.hotness_score, "leaderboard");
    }

    // Dates
    let mut planner = DatePlanner::new();
    let draft = DatePlanDraft::new()
        .date((Utc::now() + ChronoDuration::days(7)).date_naive())
        .time("19:30")
        .date_type(DateType::Virtual)
        .activity(DateType::Virtual.ideas()[0])
        .partner(first);
    match planner.submit_for(session.tier(), draft) {
        Ok(id) => info!(id, "date planned"),
        Err(e) => warn!(error = %e, "date not planned"),
    }
    match planner.calendar_sync(session.tier(), Utc::now()) {
        Ok(events) => info!(events = events.len(), "calendar synced"),
        Err(e) => warn!(error = %e, "calendar sync locked"),
    }
    let mut call = VideoChatView::new();
    match call.start(session.tier()) {
        Ok(()) => {
            call.tick(95);
            call.end();
            info!(duration = %call.duration(), "video call finished");
        }
        Err(e) => warn!(error = %e, "video chat locked"),
    }

    // Growth
    let goals = GoalBook::from_goals(fixtures::growth_goals());
    match goals.highlighted(session.tier()) {
        Ok(shown) => info!(shown = shown.len(), average = goals.average_progress(), "growth highlighted"),
        Err(e) => warn!(error = %e, "growth highlight locked"),
    }

    // Profile and settings
    session.navigate(Page::Profile);
    let mut editor = ProfileEditor::for_user(session.user());
    editor.edit();
    editor.set(ProfileField::Interests, "Climbing, Jazz, Coffee")?;
    let saved = editor.save()?;
    info!(name = %saved.name, photos = saved.photos.len(), "profile saved");

    session.navigate(Page::Settings);
    let mut settings = SettingsView::new();
    settings.set_age_range(24, 38)?;
    settings.set_distance(25)?;
    info!(prefs = ?settings.preferences(), "settings updated");

    ticker.abort();
    let pending = alerts.lock().map(|feed| feed.alerts().len()).unwrap_or_default();
    let log = service.action_log()?;
    info!(actions = log.len(), alerts = pending, "demo finished");
    Ok(true)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = parse_args();

    if let Err(e) = init_logging(&args.log_directive) {
        eprintln!("warning: {e}");
    }

    match run(args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_REJECTED),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindling::FixedScores;

    #[test]
    fn test_rejected_user_stays_locked() {
        let mut session = AppSession::new(User::new("Alex"));
        let mut scores = FixedScores::new(7, vec![7, 7, 7, 7, 7]);

        assert!(!verify(&mut session, &mut scores).unwrap());
        assert!(!session.is_verified());
        assert_eq!(session.visible_page(), Page::Verification);
    }

    #[test]
    fn test_verified_user_unlocks() {
        let mut session = AppSession::new(User::new("Alex"));
        let mut scores = FixedScores::new(9, vec![9, 8, 9, 8, 9]);

        assert!(verify(&mut session, &mut scores).unwrap());
        assert!(session.is_verified());
    }
}
