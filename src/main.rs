//! Yonna CLI - client for the Yonna Akademia platform
//!
//! A terminal client for the Wayuu language-learning backend: login,
//! profile management, media browsing and upload, and admin views.

mod api;
mod auth;
mod config;
mod models;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "yonna-cli")]
#[command(about = "CLI client for the Yonna Akademia platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with email and password, or a Google ID token
    Login {
        /// Account email
        #[arg(short, long, required_unless_present = "google")]
        email: Option<String>,

        /// Account password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Google ID token for federated login
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        username: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Log out and clear cached credentials
    Logout,

    /// Show current authentication status
    Status,

    /// Show current user info (verify auth works)
    Whoami,

    /// View or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Browse, upload, and moderate media content
    Media {
        #[command(subcommand)]
        action: MediaCommands,
    },

    /// Browse and manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Take quizzes and review attempts
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },

    /// Show learning progress
    Progress {
        /// Limit to one course
        #[arg(short, long)]
        course: Option<u64>,

        /// Show the learning-stats breakdown instead
        #[arg(long)]
        stats: bool,
    },

    /// List all users (admin)
    Users,

    /// Show platform statistics
    Stats {
        /// Show the per-user engagement breakdown instead
        #[arg(long)]
        engagement: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the full profile
    Show,

    /// Update profile fields
    Edit {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        /// Learner level: beginner, intermediate, advanced
        #[arg(long)]
        level: Option<String>,
    },

    /// Upload an avatar image
    Avatar {
        /// Path to the image file
        file: PathBuf,
    },

    /// Change the account password
    ChangePassword {
        #[arg(long)]
        old: String,

        #[arg(long)]
        new: String,
    },
}

#[derive(Subcommand)]
enum CourseCommands {
    /// List courses available for your level
    List,

    /// Show one course with its lessons
    Show { id: u64 },

    /// Create a course (teachers only)
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// beginner, intermediate or advanced
        #[arg(short, long)]
        level: Option<String>,
    },

    /// Enroll in a course
    Enroll { id: u64 },
}

#[derive(Subcommand)]
enum QuizCommands {
    /// List available quizzes
    List,

    /// Show one quiz with its questions
    Show { id: u64 },

    /// Submit a score for a quiz
    Attempt {
        id: u64,

        #[arg(short, long)]
        score: i64,
    },

    /// Show my past attempts
    History,
}

#[derive(Subcommand)]
enum MediaCommands {
    /// List media content
    List {
        /// Filter by type: audio, video, image, document
        #[arg(short = 't', long)]
        media_type: Option<String>,

        /// Search text
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one media item
    Show { id: u64 },

    /// Upload a media file
    Upload {
        /// Path to the file
        file: PathBuf,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// audio, video, image or document
        #[arg(short = 'k', long, default_value = "audio")]
        media_type: String,

        /// Repeatable tag
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Update title/description of a media item
    Update {
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a media item
    Delete { id: u64 },

    /// Approve a pending item (admin)
    Approve { id: u64 },

    /// Feature an item on the landing page (admin)
    Feature { id: u64 },

    /// List my uploads
    MyUploads,

    /// Record a view of a media item
    RecordView {
        id: u64,

        /// Seconds watched
        #[arg(short, long, default_value = "0")]
        duration: u64,
    },
}

/// Prompt for a password on stdin when it was not passed as a flag.
fn read_password() -> Result<String> {
    use std::io::Write;
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login {
            email,
            password,
            google,
        } => {
            if let Some(id_token) = google {
                auth::login_google(&id_token).await?;
            } else if let Some(email) = email {
                let password = match password {
                    Some(p) => p,
                    None => read_password()?,
                };
                auth::login(&email, &password).await?;
            } else {
                anyhow::bail!("--email is required unless --google is given");
            }
        }
        Commands::Register {
            email,
            password,
            username,
            first_name,
            last_name,
        } => {
            auth::register(
                &email,
                &password,
                &username,
                first_name.as_deref(),
                last_name.as_deref(),
            )
            .await?;
        }
        Commands::Logout => {
            auth::logout().await?;
        }
        Commands::Status => {
            auth::status().await?;
        }
        Commands::Whoami => {
            api::whoami().await?;
        }
        Commands::Profile { action } => match action {
            ProfileCommands::Show => {
                api::show_profile().await?;
            }
            ProfileCommands::Edit {
                first_name,
                last_name,
                bio,
                level,
            } => {
                api::edit_profile(first_name, last_name, bio, level).await?;
            }
            ProfileCommands::Avatar { file } => {
                api::upload_avatar(&file).await?;
            }
            ProfileCommands::ChangePassword { old, new } => {
                auth::change_password(&old, &new).await?;
            }
        },
        Commands::Media { action } => match action {
            MediaCommands::List {
                media_type,
                search,
                limit,
            } => {
                api::list_media(media_type, search, limit).await?;
            }
            MediaCommands::Show { id } => {
                api::show_media(id).await?;
            }
            MediaCommands::Upload {
                file,
                title,
                description,
                media_type,
                tags,
            } => {
                api::upload_media(&file, &title, description.as_deref(), &media_type, &tags)
                    .await?;
            }
            MediaCommands::Update {
                id,
                title,
                description,
            } => {
                api::update_media(id, title, description).await?;
            }
            MediaCommands::Delete { id } => {
                api::delete_media(id).await?;
            }
            MediaCommands::Approve { id } => {
                api::approve_media(id).await?;
            }
            MediaCommands::Feature { id } => {
                api::feature_media(id).await?;
            }
            MediaCommands::MyUploads => {
                api::my_uploads().await?;
            }
            MediaCommands::RecordView { id, duration } => {
                api::record_view(id, duration).await?;
            }
        },
        Commands::Course { action } => match action {
            CourseCommands::List => {
                api::list_courses().await?;
            }
            CourseCommands::Show { id } => {
                api::show_course(id).await?;
            }
            CourseCommands::Create {
                title,
                description,
                level,
            } => {
                api::create_course(&title, description.as_deref(), level.as_deref()).await?;
            }
            CourseCommands::Enroll { id } => {
                api::enroll_course(id).await?;
            }
        },
        Commands::Quiz { action } => match action {
            QuizCommands::List => {
                api::list_quizzes().await?;
            }
            QuizCommands::Show { id } => {
                api::show_quiz(id).await?;
            }
            QuizCommands::Attempt { id, score } => {
                api::submit_quiz(id, score).await?;
            }
            QuizCommands::History => {
                api::quiz_history().await?;
            }
        },
        Commands::Progress { course, stats } => {
            api::show_progress(course, stats).await?;
        }
        Commands::Users => {
            api::list_users().await?;
        }
        Commands::Stats { engagement } => {
            api::show_stats(engagement).await?;
        }
    }

    Ok(())
}
