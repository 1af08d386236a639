//! Text shown in the resume browser at the end of the intro.

use std::path::Path;

/// One tab of the resume browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeTab {
    About,
    Experience,
    Skills,
    Projects,
    Resume,
}

impl ResumeTab {
    pub const ALL: [ResumeTab; 5] = [
        ResumeTab::About,
        ResumeTab::Experience,
        ResumeTab::Skills,
        ResumeTab::Projects,
        ResumeTab::Resume,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ResumeTab::About => "About",
            ResumeTab::Experience => "Experience",
            ResumeTab::Skills => "Skills",
            ResumeTab::Projects => "Projects",
            ResumeTab::Resume => "Resume",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> ResumeTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> ResumeTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Body text for the tab. The resume tab points at the PDF, if any.
    pub fn body(self, resume_pdf: Option<&Path>) -> String {
        match self {
            ResumeTab::About => ABOUT.join("\n"),
            ResumeTab::Experience => EXPERIENCE.join("\n"),
            ResumeTab::Skills => SKILLS.join("\n"),
            ResumeTab::Projects => PROJECTS.join("\n"),
            ResumeTab::Resume => match resume_pdf {
                Some(path) => format!(
                    "Resume (PDF)\n\nThe full resume lives at:\n  {}\n\nOpen it with any PDF viewer.",
                    path.display()
                ),
                None => "Resume (PDF)\n\nNo resume file is configured.\n\
                         Set `resume_pdf` in the config file to point at one."
                    .to_owned(),
            },
        }
    }
}

const ABOUT: &[&str] = &[
    "About",
    "",
    "Data science student with an engineering streak.",
    "Builds trading tools, crawlers and small 3D toys like this one.",
    "Chess player, climber, euphonium in a past life.",
];

const EXPERIENCE: &[&str] = &[
    "Experience",
    "",
    "Rust / Arbitrage & Trading",
    "  - Price comparison across two skin marketplaces, reselling the spread",
    "  - Open-source client library for a brokerage API",
    "",
    "Markets / Portfolio Monitoring",
    "  - Tracked local and international markets for opportunities",
    "  - Reviewed portfolio performance to improve returns",
    "",
    "Automation / Python",
    "  - Automated story video generation and upload",
    "  - Several web crawlers",
];

const SKILLS: &[&str] = &[
    "Skills",
    "",
    "Strengths",
    "  - Analytical and critical thinking",
    "  - Self-driven; picks up new languages quickly",
    "",
    "Engineering",
    "  - Always-on trading bots",
    "  - Market analysis with trading platforms",
    "",
    "Tools",
    "  - Rust, Python, office suites, audio and image editors",
];

const PROJECTS: &[&str] = &[
    "Projects",
    "",
    "This portfolio",
    "  - Four switchable scenes sharing one renderer",
    "",
    "Brokerage API client",
    "  - Typed Rust wrapper around a REST trading API",
    "",
    "Marketplace arbitrage bot",
    "  - Watches two markets and flags profitable resales",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(ResumeTab::Resume.next(), ResumeTab::About);
        assert_eq!(ResumeTab::About.previous(), ResumeTab::Resume);
        assert_eq!(ResumeTab::Skills.next(), ResumeTab::Projects);
    }

    #[test]
    fn resume_tab_mentions_the_configured_pdf() {
        let body = ResumeTab::Resume.body(Some(Path::new("assets/resume.pdf")));
        assert!(body.contains("assets/resume.pdf"));
        assert!(ResumeTab::Resume.body(None).contains("resume_pdf"));
    }
}
