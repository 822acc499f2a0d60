//! Footer content shared by every page.

use chrono::Datelike;
use serde::Serialize;

pub const SITE_NAME: &str = "APIs You Won't Hate";
pub const TAGLINE: &str = "APIs You Wont Hate is the recommended manual for building well designed \
     and well crafted APIs. Join us, read our blog posts, search our community of knowledge \
     and put it to good use building robust APIs";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FooterLink {
    pub label: &'static str,
    pub href: &'static str,
    /// `rel` attribute for links that open in a new tab. `None` for internal links.
    pub rel: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FooterSection {
    pub title: &'static str,
    pub links: &'static [FooterLink],
}

const fn internal(label: &'static str, href: &'static str) -> FooterLink {
    FooterLink {
        label,
        href,
        rel: None,
    }
}

const fn external(label: &'static str, href: &'static str, rel: &'static str) -> FooterLink {
    FooterLink {
        label,
        href,
        rel: Some(rel),
    }
}

pub const SECTIONS: &[FooterSection] = &[
    FooterSection {
        title: "Resources",
        links: &[
            internal("Books", "/books"),
            internal("Blog", "/blog"),
            internal("Videos", "/videos"),
            internal("Podcast", "/podcast"),
            internal("Ask us a question", "/ama"),
        ],
    },
    FooterSection {
        title: "Community",
        links: &[
            internal("Join our Community", "/community"),
            internal("About Us", "/about"),
            internal("Authors", "/about"),
            internal("Code of Conduct", "/conduct"),
        ],
    },
    FooterSection {
        title: "More help",
        links: &[internal(
            "API Design Consulting",
            "https://calendly.com/philsturgeon",
        )],
    },
    FooterSection {
        title: "Online",
        links: &[
            external(
                "GitHub",
                "https://github.com/apisyouwonthate",
                "noreferrer noopener",
            ),
            external("RSS", "/rss.xml", "noreferrer noopener me"),
            external(
                "Twitter",
                "https://twitter.com/apisyouwonthate",
                "noreferrer noopener me",
            ),
        ],
    },
];

pub fn copyright_line(year: i32) -> String {
    format!("© {year} {SITE_NAME}. All rights reserved.")
}

#[derive(Debug, Serialize)]
pub struct FooterView {
    pub tagline: &'static str,
    pub sections: &'static [FooterSection],
    pub copyright: String,
}

impl FooterView {
    pub fn current() -> Self {
        Self {
            tagline: TAGLINE,
            sections: SECTIONS,
            copyright: copyright_line(chrono::Utc::now().year()),
        }
    }
}
