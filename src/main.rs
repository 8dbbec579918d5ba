use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use sprig::areas::repository::Repository;
use sprig::artifacts::core::PagerWriter;

#[derive(Parser)]
#[command(
    name = "sprig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "sprig tracks snapshots of a working directory as an immutable, \
    content-addressed history graph, supports branching and three-way merges, \
    and can reconstruct any tracked state back into the working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "commit", about = "Create a new commit with the specified message")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or stage it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(name = "log", about = "Show first-parent history from HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "Three forms: `checkout -- <file>` restores a file from HEAD, \
        `checkout <commit> -- <file>` restores it from an arbitrary commit, \
        and `checkout <branch>` switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when restoring a file")]
        target: Option<String>,
        #[arg(last = true, index = 2, help = "File to restore (after --)")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current HEAD commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to an arbitrary commit")]
    Reset {
        #[arg(index = 1, help = "The commit id, full or abbreviated")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register a remote (not supported)")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        directory: String,
    },
    #[command(name = "rm-remote", about = "Remove a remote (not supported)")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Push to a remote (not supported)")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Fetch from a remote (not supported)")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Pull from a remote (not supported)")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

fn use_pager() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none()
}

fn repository_at_cwd(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), writer)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.init().await?
        }
        Commands::Add { path } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.add(path).await?
        }
        Commands::Commit { message } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.commit(message).await?
        }
        Commands::Rm { path } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.rm(path).await?
        }
        Commands::Log => {
            if use_pager() {
                let pager = minus::Pager::new();
                let repository = repository_at_cwd(Box::new(PagerWriter::new(pager.clone())))?;
                repository.log()?;
                minus::page_all(pager)?;
            } else {
                let repository = repository_at_cwd(Box::new(std::io::stdout()))?;
                repository.log()?;
            }
        }
        Commands::GlobalLog => {
            if use_pager() {
                let pager = minus::Pager::new();
                let repository = repository_at_cwd(Box::new(PagerWriter::new(pager.clone())))?;
                repository.global_log()?;
                minus::page_all(pager)?;
            } else {
                let repository = repository_at_cwd(Box::new(std::io::stdout()))?;
                repository.global_log()?;
            }
        }
        Commands::Find { message } => {
            let repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.find(message)?
        }
        Commands::Status => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.status().await?
        }
        Commands::Checkout { target, file } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            match (target, file) {
                (None, Some(file)) => repository.checkout_file(file).await?,
                (Some(commit_id), Some(file)) => {
                    repository.checkout_file_at(commit_id, file).await?
                }
                (Some(branch), None) => repository.checkout_branch(branch).await?,
                (None, None) => anyhow::bail!("Incorrect operands."),
            }
        }
        Commands::Branch { name } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.branch(name)?
        }
        Commands::RmBranch { name } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.rm_branch(name)?
        }
        Commands::Reset { commit_id } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.reset(commit_id).await?
        }
        Commands::Merge { branch } => {
            let mut repository = repository_at_cwd(Box::new(std::io::stdout()))?;
            repository.merge(branch).await?
        }
        Commands::AddRemote { .. }
        | Commands::RmRemote { .. }
        | Commands::Push { .. }
        | Commands::Fetch { .. }
        | Commands::Pull { .. } => {
            anyhow::bail!("Remote commands are not supported.")
        }
    }

    Ok(())
}
