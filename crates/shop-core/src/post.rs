//! # Social Post
//!
//! A plain data holder with a console rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the separator printed under each post
const SEPARATOR_WIDTH: usize = 30;

/// A social media post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Who wrote the post
    pub author: String,

    /// Post body
    pub content: String,

    /// Like counter
    #[serde(default)]
    pub likes: u32,
}

impl Post {
    /// Create a post with an explicit like count
    pub fn new(author: impl Into<String>, content: impl Into<String>, likes: u32) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            likes,
        }
    }

    /// Create a post with no likes yet
    pub fn unliked(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(author, content, 0)
    }

    /// Builder: set likes
    pub fn with_likes(mut self, likes: u32) -> Self {
        self.likes = likes;
        self
    }

    /// Print the post to stdout
    pub fn display(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Post by {}:", self.author)?;
        writeln!(f, "\"{}\"", self.content)?;
        writeln!(f, "Likes: {}", self.likes)?;
        writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_rendering() {
        let post = Post::new("Alice", "Just finished my first Rust assignment!", 15);

        assert_eq!(
            post.to_string(),
            "Post by Alice:\n\"Just finished my first Rust assignment!\"\nLikes: 15\n------------------------------\n"
        );
    }

    #[test]
    fn test_unliked_defaults_to_zero() {
        let post = Post::unliked("Bob", "Learning classes is fun!");
        assert_eq!(post.likes, 0);
        assert_eq!(post.with_likes(7).likes, 7);
    }
}
