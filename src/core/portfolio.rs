//! Built-in page content.
//!
//! The page is static: everything shown is compiled in here.  The only parts
//! with behaviour are the screenshot strips attached to each [`Work`].

use std::collections::HashSet;

use chrono::Datelike;

use super::strip::ImageItem;

/// Page sections reachable from the nav bar and the hero buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Works,
    Stack,
    Contact,
}

impl Section {
    /// Nav order.
    pub const ALL: &[Section] = &[Section::Works, Section::Stack, Section::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Section::Works => "Works",
            Section::Stack => "Tech stack",
            Section::Contact => "Contact",
        }
    }
}

/// A hero button that jumps to a section.
#[derive(Debug, Clone)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Section,
}

#[derive(Debug, Clone)]
pub struct LinkItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// A small label/value card (e.g. "Runtime" → "Commercial / 24×7").
#[derive(Debug, Clone)]
pub struct Highlight {
    pub label: &'static str,
    pub value: &'static str,
}

/// One project case study.
#[derive(Debug, Clone)]
pub struct Work {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub tags: Vec<&'static str>,
    pub bullets: Vec<&'static str>,
    pub highlights: Vec<Highlight>,
    pub links: Vec<LinkItem>,
    /// Screenshots, in display order.  May be empty.
    pub images: Vec<ImageItem>,
}

#[derive(Debug, Clone)]
pub struct Contact {
    pub name: &'static str,
    pub blurb: &'static str,
    pub links: Vec<LinkItem>,
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub owner: &'static str,
    pub headline: &'static str,
    pub intro: &'static str,
    pub hero_highlights: Vec<Highlight>,
    pub works: Vec<Work>,
    pub calls_to_action: Vec<CallToAction>,
    pub tech_stack: Vec<&'static str>,
    pub contact: Contact,
    /// Year shown in the footer copyright.
    pub year: i32,
    pub footer_note: &'static str,
}

impl Portfolio {
    pub fn builtin() -> Self {
        Self {
            owner: "Nick",
            headline: "Project Showcase",
            intro: "I'm Nick, a software engineer focused on commercial playback systems and \
                    system integration, with years of experience shipping enterprise systems \
                    into real deployments: video streaming, clinic systems, ERP/WMS and on-site \
                    device integration. Most of my work is Android TV signage and clinic \
                    queue-calling systems, built for long unattended runs, offline tolerance \
                    and maintainable architecture.",
            hero_highlights: vec![
                Highlight {
                    label: "Focus",
                    value: "System integration engineering",
                },
                Highlight {
                    label: "Strengths",
                    value: "24/7 playback stability, operable architecture, cross-platform integration",
                },
                Highlight {
                    label: "Domains",
                    value: "Clinics, signage, digital displays, on-site devices, app integration",
                },
            ],
            calls_to_action: vec![
                CallToAction {
                    label: "View works",
                    target: Section::Works,
                },
                CallToAction {
                    label: "Contact me",
                    target: Section::Contact,
                },
            ],
            works: vec![
                Work {
                    title: "Work 1: Android TV commercial signage system",
                    subtitle: "Live streams, ad scheduling, tickers, queue calling and remote \
                               operations in one player, built for stable 24/7 playback.",
                    tags: vec!["Flutter", "Android TV", "ExoPlayer/Video", "WebSocket", "Sentry", "GCP"],
                    bullets: vec![
                        "Multi-source playback: YouTube / streams / locally cached video",
                        "Ad scheduling and rotation that keeps playing offline",
                        "Playback watchdog plus memory and MediaCodec fault tolerance",
                        "Remote device management (updates, monitoring, operations)",
                        "Real-time queue number push across multiple consulting rooms",
                    ],
                    highlights: vec![
                        Highlight {
                            label: "Runtime",
                            value: "Commercial deployment / 24×7",
                        },
                        Highlight {
                            label: "Core value",
                            value: "Stable playback + operability",
                        },
                        Highlight {
                            label: "Key abilities",
                            value: "Offline cache / anti-freeze / monitoring",
                        },
                    ],
                    links: Vec::new(),
                    images: vec![
                        ImageItem::new("/images/home.png"),
                        ImageItem::new("/images/googlePage.png"),
                    ],
                },
                Work {
                    title: "Work 2: Queue-calling bridge service and device integration",
                    subtitle: "Clinic devices or exported files feed a local bridge that uploads \
                               securely to the cloud, which pushes over WebSocket to TV walls and \
                               the back office, end to end.",
                    tags: vec!["Node.js", "File Watcher", "Webhook", "WebSocket", "Security", "Edge"],
                    bullets: vec![
                        "Local bridge service watching data sources (files or device output)",
                        "Debounce / retry / reconnect to ride out unstable sites",
                        "Signed payloads and verification against forged data",
                        "Cloud API + WebSocket fan-out to keep many devices in sync",
                        "Extensible to card readers and other clinic-side integrations",
                    ],
                    highlights: vec![
                        Highlight {
                            label: "Environment",
                            value: "Clinic machine + cloud",
                        },
                        Highlight {
                            label: "Core value",
                            value: "System integration",
                        },
                        Highlight {
                            label: "Data flow",
                            value: "Device/file → Bridge → Cloud → TV/back office",
                        },
                    ],
                    links: Vec::new(),
                    images: Vec::new(),
                },
            ],
            tech_stack: vec![
                "Flutter / Dart",
                "React / TypeScript",
                "Android TV / ExoPlayer",
                "Node.js",
                "WebSocket",
                "GCP (Cloud Run / Cloud SQL / Storage)",
                "PostgreSQL / Redis",
                "Sentry Observability",
            ],
            contact: Contact {
                name: "Nick Chen",
                blurb: "Commercial Android TV playback, clinic queue-calling and end-to-end \
                        integration: from proof of concept and architecture through on-site \
                        rollout to long-term operation, turning ideas into commercial systems \
                        that keep running.",
                links: vec![
                    LinkItem {
                        label: "Email: nn840928@gmail.com",
                        href: "mailto:nn840928@gmail.com",
                    },
                    LinkItem {
                        label: "Line: @nick8409",
                        href: "https://line.me/ti/p/VV3h7YjKu4",
                    },
                ],
            },
            year: chrono::Local::now().year(),
            footer_note: "Built with React · Hosted on Netlify",
        }
    }

    /// Site title shown in the nav bar and above the headline.
    pub fn brand(&self) -> String {
        format!("{} · portfolio", self.owner)
    }

    /// Footer copyright line.
    pub fn copyright(&self) -> String {
        format!("© {} {}", self.year, self.contact.name)
    }

    /// Every distinct screenshot on the page, in first-appearance order.
    pub fn image_items(&self) -> Vec<ImageItem> {
        let mut seen = HashSet::new();
        self.works
            .iter()
            .flat_map(|w| w.images.iter())
            .filter(|item| seen.insert((*item).clone()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_page_has_two_works_and_one_strip_with_images() {
        let page = Portfolio::builtin();
        assert_eq!(page.works.len(), 2);
        assert_eq!(page.works[0].images.len(), 2);
        assert!(page.works[1].images.is_empty());
    }

    #[test]
    fn hero_buttons_jump_to_works_and_contact() {
        let page = Portfolio::builtin();
        let targets: Vec<_> = page.calls_to_action.iter().map(|c| c.target).collect();
        assert_eq!(targets, [Section::Works, Section::Contact]);
        assert!(page.copyright().starts_with("© "));
        assert!(page.copyright().ends_with("Nick Chen"));
    }

    #[test]
    fn image_items_are_deduplicated_in_order() {
        let mut page = Portfolio::builtin();
        page.works[1].images = vec![
            ImageItem::new("/images/googlePage.png"),
            ImageItem::new("/images/extra.png"),
        ];
        let uris: Vec<_> = page.image_items().iter().map(|i| i.uri().to_string()).collect();
        assert_eq!(
            uris,
            ["/images/home.png", "/images/googlePage.png", "/images/extra.png"]
        );
    }
}
