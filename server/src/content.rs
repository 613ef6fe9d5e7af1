//! Static page content, served to the frontend as JSON.
//!
//! The frontend is a thin renderer; every heading, paragraph, and link on
//! the three pages comes from here so copy changes never touch the client.
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::affiliation::{GENDERS, PROVINCES, SECTORS};

pub const ORG_NAME: &str = "Mkhonto National Union";
pub const ORG_EMAIL: &str = "mkhontonationalunion@gmail.com";
pub const ORG_ADDRESS: &str = "1415 Manaye Road, Imbali unit 1, Pietermaritzburg 3201";
pub const ORG_PHONES: [&str; 2] = ["+27 64 505 5259", "+27 73 257 0686"];
pub const ORG_MAP_URL: &str =
    "https://maps.google.com/?q=1415+Manaye+Road+Imbali+unit+1+Pietermaritzburg+3201";

#[derive(Serialize)]
pub struct PageLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Serialize)]
pub struct Hero {
    pub heading: &'static str,
    pub tagline: &'static str,
    pub actions: Vec<PageLink>,
}

#[derive(Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct MovementSection {
    pub heading: &'static str,
    pub paragraphs: Vec<&'static str>,
    pub core_values: Vec<&'static str>,
    pub action: PageLink,
}

#[derive(Serialize)]
pub struct JoinBanner {
    pub heading: &'static str,
    pub message: &'static str,
    pub actions: Vec<PageLink>,
}

#[derive(Serialize)]
pub struct Footer {
    pub blurb: &'static str,
    pub links: Vec<PageLink>,
    pub copyright: String,
}

#[derive(Serialize)]
pub struct HomePage {
    pub hero: Hero,
    pub features_heading: &'static str,
    pub features_intro: &'static str,
    pub features: Vec<Feature>,
    pub movement: MovementSection,
    pub banner: JoinBanner,
    pub footer: Footer,
}

#[derive(Serialize)]
pub struct FormMetadata {
    pub provinces: Vec<&'static str>,
    pub genders: Vec<&'static str>,
    pub sectors: Vec<&'static str>,
    pub disability_options: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct AffiliatePage {
    pub heading: &'static str,
    pub intro: &'static str,
    pub form: FormMetadata,
    pub footer: Footer,
}

#[derive(Serialize)]
pub struct ContactCard {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub href: String,
}

#[derive(Serialize)]
pub struct ContactPage {
    pub heading: &'static str,
    pub intro: &'static str,
    pub cards: Vec<ContactCard>,
    pub footer: Footer,
}

pub fn home_page() -> HomePage {
    HomePage {
        hero: Hero {
            heading: "Mkhonto National Union",
            tagline: "Uniting workers. Fighting for rights. Building a better future.",
            actions: vec![
                PageLink { label: "Affiliate Today", href: "/affiliate" },
                PageLink { label: "Contact Us", href: "/contact" },
            ],
        },
        features_heading: "Why Join MNU?",
        features_intro: "The Mkhonto National Union is committed to improving working \
                         conditions and upholding the rights of workers across all sectors.",
        features: vec![
            Feature {
                title: "Worker Protection",
                description: "We fight for your rights in the workplace, ensuring fair \
                              treatment and equitable compensation.",
            },
            Feature {
                title: "Collective Bargaining",
                description: "Our collective strength enables us to negotiate better terms \
                              and conditions for all members.",
            },
            Feature {
                title: "Legal Support",
                description: "Members receive professional legal advice and representation \
                              in labor-related matters.",
            },
        ],
        movement: MovementSection {
            heading: "The People's Movement",
            paragraphs: vec![
                "The Mkhonto National Union stands in the proud tradition of uMkhonto \
                 Wesizwe, continuing the legacy of fighting for social justice, economic \
                 freedom, and true democracy for all South Africans.",
                "Our union represents the aspirations of all people, not just workers, \
                 seeking to build a more equitable society where economic opportunity and \
                 social justice extend to every citizen regardless of background.",
            ],
            core_values: vec![
                "Economic liberation and equality for all South Africans",
                "Protection of workers' rights and fair labor practices",
                "Land reform and restoration of ancestral lands",
                "Quality education and healthcare for all citizens",
                "Sovereignty and protection of South African resources",
            ],
            action: PageLink { label: "Join Our Movement", href: "/affiliate" },
        },
        banner: JoinBanner {
            heading: "Join the Movement for a Better South Africa",
            message: "The Mkhonto National Union is fighting for economic freedom, social \
                      justice, and true democracy. Our strength comes from the people - \
                      join us today!",
            actions: vec![
                PageLink { label: "Become a Member", href: "/affiliate" },
                PageLink { label: "Contact Our Leadership", href: "/contact" },
            ],
        },
        footer: footer(),
    }
}

pub fn affiliate_page() -> AffiliatePage {
    AffiliatePage {
        heading: "Join the People's Movement",
        intro: "The Mkhonto National Union welcomes all South Africans who believe in \
                economic freedom, social justice, and true democracy. By joining MNU, you \
                become part of a movement fighting for the rights and dignity of all \
                people, continuing the proud legacy of uMkhonto Wesizwe.",
        form: FormMetadata {
            provinces: PROVINCES.to_vec(),
            genders: GENDERS.to_vec(),
            sectors: SECTORS.to_vec(),
            disability_options: vec!["Yes", "No"],
        },
        footer: footer(),
    }
}

pub fn contact_page() -> ContactPage {
    ContactPage {
        heading: "Contact People's Movement",
        intro: "The Mkhonto National Union is a movement for all citizens of South \
                Africa. Whether you have questions, want to volunteer, or need assistance \
                with community organizing, our team is ready to support the people's \
                cause.",
        cards: vec![
            ContactCard {
                title: "Visit Us",
                lines: vec![ORG_ADDRESS.to_string()],
                href: ORG_MAP_URL.to_string(),
            },
            ContactCard {
                title: "Email Us",
                lines: vec![ORG_EMAIL.to_string()],
                href: format!("mailto:{ORG_EMAIL}"),
            },
            ContactCard {
                title: "Call Us",
                lines: ORG_PHONES.iter().map(|p| p.to_string()).collect(),
                href: format!("tel:{}", ORG_PHONES[0].replace(' ', "")),
            },
        ],
        footer: footer(),
    }
}

fn footer() -> Footer {
    Footer {
        blurb: "Empowering workers across South Africa",
        links: vec![
            PageLink { label: "Home", href: "/" },
            PageLink { label: "Affiliate", href: "/affiliate" },
            PageLink { label: "Contact", href: "/contact" },
        ],
        copyright: format!("© {} {ORG_NAME}. All rights reserved.", Utc::now().year()),
    }
}
