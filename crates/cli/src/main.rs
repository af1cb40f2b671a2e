//! Pathway CLI - local driver for the roadmap service.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use pathway_core::{AccountId, Answer, GenerationSpec, NodeStatus};
use pathway_generator::{HttpGenerator, OutlineGenerator, RoadmapGenerator};
use pathway_progress::PrereqGraph;
use pathway_service::RoadmapService;
use pathway_storage::JsonStorage;

#[derive(Parser)]
#[command(name = "pathway")]
#[command(about = "Learning-roadmap progression backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new roadmap
    Generate {
        /// Target role
        role: String,
        /// Concrete goal
        #[arg(long)]
        goal: String,
        /// What you already know
        #[arg(long, default_value = "")]
        stack: String,
        /// Weekly time budget
        #[arg(long, default_value = "10")]
        hours: u32,
        /// Learning style
        #[arg(long, default_value = "mixed")]
        style: String,
        /// Plan focus
        #[arg(long, default_value = "job-ready")]
        focus: String,
        /// Constraints, e.g. free-only
        #[arg(long, default_value = "")]
        constraints: String,
    },
    /// List your roadmaps
    List,
    /// Show one roadmap with node statuses
    Show {
        /// Roadmap ID
        id: String,
    },
    /// Start a roadmap (unlocks the entry nodes)
    Start {
        /// Roadmap ID
        id: String,
    },
    /// Show the quiz for a node
    Quiz {
        /// Node ID
        node: String,
    },
    /// Submit quiz answers for a node
    Submit {
        /// Node ID
        node: String,
        /// Answers as question_id=option_index, repeatable
        #[arg(long = "answer")]
        answers: Vec<String>,
    },
    /// Show the progression timeline of a roadmap
    Events {
        /// Roadmap ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let data_dir = std::path::PathBuf::from(".pathway");
    let storage = Arc::new(JsonStorage::new(&data_dir).await?);
    let caller = local_account(&data_dir)?;

    // A remote generation backend is used when configured; otherwise the
    // deterministic outline keeps the CLI usable offline.
    let generator: Arc<dyn RoadmapGenerator> = match std::env::var("PATHWAY_GENERATOR_URL") {
        Ok(url) => Arc::new(HttpGenerator::new(
            url,
            std::env::var("PATHWAY_GENERATOR_KEY").ok(),
        )),
        Err(_) => Arc::new(OutlineGenerator::new()),
    };

    let service = RoadmapService::new(storage, generator);

    match cli.command {
        Commands::Generate { role, goal, stack, hours, style, focus, constraints } => {
            let spec = GenerationSpec {
                role,
                current_stack: stack,
                goal,
                hours_per_week: hours,
                learning_style: style,
                focus,
                constraints,
            };
            let roadmap = service.generate(caller, &spec).await?;
            println!("Generated roadmap: {} - {}", roadmap.id, roadmap.title);
            println!(
                "  {} nodes, ~{}h over {} weeks",
                roadmap.nodes.len(),
                roadmap.total_estimated_hours,
                roadmap.total_weeks
            );
            println!("Run `pathway start {}` to unlock the first nodes.", roadmap.id);
        }
        Commands::List => {
            let roadmaps = service.list(caller).await?;
            println!("Roadmaps ({})", roadmaps.len());
            for r in roadmaps {
                let done = r
                    .nodes
                    .iter()
                    .filter(|n| n.status == NodeStatus::Completed)
                    .count();
                println!(
                    "  {} | {} | {}/{} completed{}",
                    r.id,
                    r.title,
                    done,
                    r.nodes.len(),
                    if r.started { "" } else { " (not started)" },
                );
            }
        }
        Commands::Show { id } => {
            let roadmap = service.get(caller, id.parse()?).await?;
            println!("Roadmap: {} ({})", roadmap.title, roadmap.difficulty);
            println!("  {}", roadmap.description);

            // Print in dependency order so prerequisites read top-down.
            let graph = PrereqGraph::build(&roadmap.nodes)?;
            for node_id in graph.order() {
                let Some(node) = roadmap.node(*node_id) else {
                    continue;
                };
                println!(
                    "  [{}] {} | {} (~{}h, {} questions)",
                    format_status(node.status),
                    node.id,
                    node.title,
                    node.estimated_hours,
                    node.questions.len(),
                );
                for resource in &node.resources {
                    println!("      {} <{}>", resource.title, resource.url);
                }
            }
            for milestone in &roadmap.milestones {
                println!("  Milestone '{}': {}", milestone.name, milestone.outcome);
            }
        }
        Commands::Start { id } => {
            let roadmap = service.start(caller, id.parse()?).await?;
            let open: Vec<_> = roadmap
                .nodes
                .iter()
                .filter(|n| n.status == NodeStatus::Available)
                .collect();
            println!("Started '{}'. Available now:", roadmap.title);
            for node in open {
                println!("  {} - {}", node.id, node.title);
            }
        }
        Commands::Quiz { node } => {
            let questions = service.questions(caller, node.parse()?).await?;
            if questions.is_empty() {
                println!("No questions; submit an empty answer set to complete the node.");
            }
            for q in questions {
                println!("{} {}", q.id, q.text);
                for (i, option) in q.options.iter().enumerate() {
                    println!("    {}) {}", i, option);
                }
            }
        }
        Commands::Submit { node, answers } => {
            let answers = answers
                .iter()
                .map(|s| parse_answer(s))
                .collect::<Result<Vec<Answer>>>()?;
            let attempt = service.submit_quiz(caller, node.parse()?, &answers).await?;
            println!(
                "{} ({}/{}, {}%)",
                attempt.message, attempt.correct, attempt.total, attempt.score_percent
            );
        }
        Commands::Events { id } => {
            let events = service.events(caller, id.parse()?).await?;
            for event in events {
                println!("  {} | {:?} | {}", event.timestamp, event.kind, event.detail);
            }
        }
    }

    Ok(())
}

/// One stable local account per data directory, so ownership checks hold
/// across runs.
fn local_account(data_dir: &std::path::Path) -> Result<AccountId> {
    let path = data_dir.join("account");
    if let Ok(s) = std::fs::read_to_string(&path) {
        return Ok(s.trim().parse()?);
    }
    let account = AccountId::new();
    std::fs::create_dir_all(data_dir)?;
    std::fs::write(&path, account.to_string())?;
    Ok(account)
}

fn parse_answer(s: &str) -> Result<Answer> {
    let (question, index) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("answer must look like question_id=index: {}", s))?;
    Ok(Answer {
        question_id: question.trim().parse()?,
        selected_index: Some(index.trim().parse()?),
    })
}

fn format_status(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Locked => "LOCKED",
        NodeStatus::Available => "AVAILABLE",
        NodeStatus::Completed => "COMPLETED",
    }
}
