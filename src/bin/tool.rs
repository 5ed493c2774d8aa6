//! AGS tool-side command line client.

use clap::{Parser, Subcommand};
use lti_ags::client::{
    HttpServiceClient, LineItemFilter, LineItemServiceClient, Registration,
    ResultServiceClient, ScoreServiceClient, StaticAccessTokenProvider,
};
use lti_ags::resource::{ActivityProgress, GradingProgress, Score, serialize};
use miette::Result;

#[derive(Parser)]
#[command(name = "ags-tool")]
#[command(author, version, about = "LTI Assignment and Grade Services tool client", long_about = None)]
struct Cli {
    /// Bearer token presented to the platform
    #[arg(long, env = "AGS_ACCESS_TOKEN")]
    token: String,

    /// Platform issuer
    #[arg(long, env = "AGS_ISSUER", default_value = "https://platform.example")]
    issuer: String,

    /// Client id of the tool registration
    #[arg(long, env = "AGS_CLIENT_ID", default_value = "ags-tool")]
    client_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a score to a line item
    PublishScore {
        /// Line item URL
        line_item: String,
        /// User the score is for
        #[arg(long)]
        user: String,
        #[arg(long)]
        given: Option<f64>,
        #[arg(long)]
        maximum: Option<f64>,
        /// Initialized, Started, InProgress, Submitted or Completed
        #[arg(long, default_value = "Completed")]
        activity: ActivityProgress,
        /// NotReady, Failed, Pending, PendingManual or FullyGraded
        #[arg(long, default_value = "FullyGraded")]
        grading: GradingProgress,
        #[arg(long)]
        comment: Option<String>,
    },
    /// List the line items of a context
    ListLineItems {
        /// Line item container URL
        container: String,
        #[arg(long)]
        resource_link_id: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the results of a line item
    ListResults {
        /// Line item URL
        line_item: String,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let registration = Registration::new(cli.issuer, cli.client_id);
    let transport = HttpServiceClient::new(StaticAccessTokenProvider::new(cli.token));

    match cli.command {
        Commands::PublishScore {
            line_item,
            user,
            given,
            maximum,
            activity,
            grading,
            comment,
        } => {
            let mut score = Score::new(user);
            score.score_given = given;
            score.score_maximum = maximum;
            score.activity_progress = activity;
            score.grading_progress = grading;
            score.comment = comment;

            ScoreServiceClient::new(transport)
                .publish_score(&registration, &score, &line_item)
                .await?;
            println!("Score published");
        }
        Commands::ListLineItems {
            container,
            resource_link_id,
            tag,
            limit,
        } => {
            let filter = LineItemFilter {
                resource_link_id,
                tag,
                limit,
                ..Default::default()
            };
            let line_items = LineItemServiceClient::new(transport)
                .list_line_items(&registration, &container, &filter)
                .await?;
            println!("{}", serialize(&line_items)?);
            if let Some(next) = line_items.relation_link() {
                eprintln!("Next page: {next}");
            }
        }
        Commands::ListResults {
            line_item,
            user,
            limit,
        } => {
            let results = ResultServiceClient::new(transport)
                .list_results(&registration, &line_item, user.as_deref(), limit)
                .await?;
            println!("{}", serialize(&results)?);
            if let Some(next) = results.relation_link() {
                eprintln!("Next page: {next}");
            }
        }
    }

    Ok(())
}
