//! Static catalog of the civic tools shown alongside the documenter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meetings,
    Docs,
    Agents,
    Accessibility,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meetings => "meetings",
            Category::Docs => "docs",
            Category::Agents => "agents",
            Category::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meetings" => Ok(Category::Meetings),
            "docs" => Ok(Category::Docs),
            "agents" => Ok(Category::Agents),
            "accessibility" => Ok(Category::Accessibility),
            other => Err(format!("unknown project category: {other}")),
        }
    }
}

/// One catalog entry. `icon` is a lucide icon name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: &'static str,
    pub category: Category,
    pub badge: Option<&'static str>,
    pub featured: bool,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tech_stack: &'static [&'static str],
    pub link: &'static str,
}

static PROJECTS: [Project; 6] = [
    Project {
        id: "highlighter",
        category: Category::Meetings,
        badge: Some("Live"),
        featured: false,
        icon: "video",
        title: "Community Highlighter",
        description: "Paste a YouTube URL of a public meeting and get a searchable, speaker-diarized transcript synced to the video.",
        tech_stack: &["Python", "Whisper", "React"],
        link: "https://community-highlighter.onrender.com/",
    },
    Project {
        id: "captioner",
        category: Category::Accessibility,
        badge: Some("Web Tool"),
        featured: false,
        icon: "subtitles",
        title: "Community Captioner",
        description: "Free browser-based tool to generate real-time open captions for OBS live streams without expensive hardware.",
        tech_stack: &["JS", "WebSpeech API", "OBS"],
        link: "https://community-captioner.netlify.app/",
    },
    Project {
        id: "documenter",
        category: Category::Docs,
        badge: Some("New"),
        featured: false,
        icon: "file-search",
        title: "Civic Documenter",
        description: "Turn messy PDF attachments from municipal agendas into structured, readable data using AI parsing.",
        tech_stack: &["OCR", "LLM", "Vector DB"],
        link: "https://documenter.weirdmachine.org/",
    },
    Project {
        id: "translator",
        category: Category::Accessibility,
        badge: None,
        featured: false,
        icon: "languages",
        title: "Civic Translator",
        description: "Instantly translate complex civic documents into multiple community languages while preserving formatting.",
        tech_stack: &["AI Translation", "PDF parsing"],
        link: "https://translator.weirdmachine.org/",
    },
    Project {
        id: "civic-agent",
        category: Category::Agents,
        badge: Some("Beta"),
        featured: true,
        icon: "bot-message-square",
        title: "Commit: the Community AI Agent for Brookline, MA",
        description: "An experimental agental AI chatbot that helps you take real-world actions in your community.",
        tech_stack: &["AI Agent", "LangChain", "GCP"],
        link: "https://commit-ai-civic-agent-390658405112.us-west1.run.app/",
    },
    Project {
        id: "artificial",
        category: Category::Agents,
        badge: Some("Experimental"),
        featured: false,
        icon: "brain-circuit",
        title: "Artificial: the Game of AI",
        description: "A three-part game for learning, practicing, and critiquing AI.",
        tech_stack: &["AI Agents", "Simulation"],
        link: "https://artificial.weirdmachine.org/",
    },
];

/// Every project, in display order.
pub fn catalog() -> &'static [Project] {
    &PROJECTS
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(move |p| p.category == category)
}

pub fn featured() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|p| p.featured)
}

pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}
