//! Comment subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;

use super::KindArg;
use crate::api::{Comment, NewComment, UserContentSource};
use crate::config::ResolvedConfig;

/// Comment subcommands
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// List comments on a piece of content
    List {
        /// Content slug
        slug: String,
    },

    /// Post a comment
    Add {
        /// Content type
        #[arg(value_enum)]
        kind: KindArg,

        /// Content slug
        slug: String,

        /// Comment text
        comment: String,

        #[arg(long)]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },
}

/// Execute comment subcommands
pub async fn execute(cfg: &ResolvedConfig, command: CommentCommands) -> Result<()> {
    let client = cfg.api_client()?;

    match command {
        CommentCommands::List { slug } => {
            let comments = client
                .list_comments(&slug)
                .await
                .with_context(|| format!("Failed to fetch comments for {}", slug))?;

            if comments.is_empty() {
                println!("No comments on {}", slug);
                return Ok(());
            }

            for comment in &comments {
                println!("{}", format_comment(comment));
            }
        }
        CommentCommands::Add {
            kind,
            slug,
            comment,
            first_name,
            last_name,
        } => {
            if comment.trim().is_empty() {
                anyhow::bail!("Comment is empty");
            }

            let new_comment = NewComment {
                slug,
                content_type: kind.into(),
                first_name,
                last_name,
                comment,
            };
            let created = client
                .add_comment(&new_comment)
                .await
                .context("Failed to post comment")?;

            eprintln!("Comment posted ({})", created.id);
        }
    }

    Ok(())
}

/// One-line rendering: date, author and text
fn format_comment(comment: &Comment) -> String {
    let author = format!("{} {}", comment.first_name, comment.last_name);
    format!(
        "{}  {}: {}",
        comment.created_at.format("%-d/%m/%Y"),
        author.trim(),
        comment.comment
    )
}
