//! The static content store: every piece of text the page renders.
//!
//! Built once at startup and never mutated. [`ContentStore::builtin`] returns
//! the bundled record; [`ContentStore::from_json_file`] swaps in another one
//! with the same shape.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::links::{DeepLink, MailtoLink};
use crate::error::ContentError;
use crate::models::{
    Anchor, Award, Company, NavigationEntry, Profile, Project, ProjectId, ProjectStatus,
    ResearchItem, SkillCategory, StatMetric,
};

const DEFAULT_RESUME: &str = "/resume.pdf";

fn default_resume() -> String {
    DEFAULT_RESUME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStore {
    pub personal: Profile,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub research: Vec<ResearchItem>,
    pub awards: Vec<Award>,
    #[serde(default)]
    pub training: Vec<String>,
    #[serde(default)]
    pub companies: Vec<Company>,
    pub navigation: Vec<NavigationEntry>,
    pub hero_stats: Vec<StatMetric>,
    #[serde(default = "default_resume")]
    pub resume: String,
}

/// One way to reach the site owner, as listed in the contact section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMethod {
    pub label: &'static str,
    pub value: String,
    pub link: DeepLink,
    pub description: &'static str,
}

static BUILTIN: LazyLock<ContentStore> = LazyLock::new(bundled);

impl ContentStore {
    /// The bundled content, shared by every caller.
    pub fn builtin() -> &'static ContentStore {
        &BUILTIN
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store: ContentStore =
            serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        store.validate()?;
        tracing::debug!(path = %path.display(), projects = store.projects.len(), "loaded content");
        Ok(store)
    }

    /// Check list identifiers are unique and navigation anchors resolve.
    pub fn validate(&self) -> Result<(), ContentError> {
        unique_ids("project", self.projects.iter().map(|p| &p.id))?;
        unique_ids("research", self.research.iter().map(|r| &r.id))?;
        for entry in &self.navigation {
            if entry.href.section().is_none() {
                return Err(ContentError::UnknownAnchor {
                    name: entry.name.clone(),
                    href: entry.href.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn research_item(&self, id: &ProjectId) -> Option<&ResearchItem> {
        self.research.iter().find(|r| &r.id == id)
    }

    /// Email, phone and networking profile, in that order.
    pub fn contact_methods(&self) -> Vec<ContactMethod> {
        let personal = &self.personal;
        vec![
            ContactMethod {
                label: "Email",
                value: personal.email.clone(),
                link: DeepLink::Mail(MailtoLink::new(&personal.email)),
                description: "Best for detailed project discussions",
            },
            ContactMethod {
                label: "Phone",
                value: personal.phone.clone(),
                link: DeepLink::Call(personal.phone.clone()),
                description: "Available for calls during IST business hours",
            },
            ContactMethod {
                label: "LinkedIn",
                value: "Professional Profile".to_string(),
                link: DeepLink::External(personal.linkedin.clone()),
                description: "Connect for professional networking",
            },
        ]
    }

    /// The "Discuss Project" call to action.
    pub fn discuss_project_link(&self) -> DeepLink {
        DeepLink::Mail(MailtoLink::new(&self.personal.email).with_subject("Project Discussion"))
    }

    pub fn resume_link(&self) -> DeepLink {
        DeepLink::Download(self.resume.clone())
    }

    pub fn profile_link(&self) -> DeepLink {
        DeepLink::External(self.personal.linkedin.clone())
    }
}

fn unique_ids<'a>(
    list: &'static str,
    ids: impl Iterator<Item = &'a ProjectId>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(ContentError::DuplicateId {
                list,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(label: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        label: label.to_string(),
        skills: strings(skills),
    }
}

fn project(
    id: &str,
    title: &str,
    impact: &str,
    category: &str,
    description: &str,
    key_features: &[&str],
    technologies: &[&str],
) -> Project {
    Project {
        id: ProjectId::new(id),
        title: title.to_string(),
        impact: impact.to_string(),
        category: category.to_string(),
        status: ProjectStatus::Completed,
        description: description.to_string(),
        key_features: strings(key_features),
        technologies: strings(technologies),
    }
}

fn nav(name: &str, href: &str) -> NavigationEntry {
    NavigationEntry {
        name: name.to_string(),
        href: Anchor::new(href),
    }
}

fn stat(label: &str, value: &str) -> StatMetric {
    StatMetric {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn award(title: &str, organization: &str, year: &str) -> Award {
    Award {
        title: title.to_string(),
        organization: organization.to_string(),
        year: year.to_string(),
    }
}

fn company(name: &str, description: &str) -> Company {
    Company {
        name: name.to_string(),
        description: description.to_string(),
        logo: format!("/images/companies/{}.svg", name.to_lowercase()),
    }
}

fn bundled() -> ContentStore {
    ContentStore {
        personal: Profile {
            name: "SHANGKORONG KHALING".to_string(),
            title: "Design Verification Engineer — UVM/SystemVerilog".to_string(),
            tagline: "Building robust, reusable verification environments for high-performance silicon"
                .to_string(),
            phone: "+91 88260 23831".to_string(),
            email: "shangkorongkhaling@gmail.com".to_string(),
            linkedin: "https://www.linkedin.com/in/lalavluna/".to_string(),
            location: "India".to_string(),
        },
        skills: vec![
            category(
                "Verification",
                &[
                    "UVM", "SystemVerilog", "Verilog", "Constrained-random", "Coverage",
                    "Assertions", "Scoreboards", "BFMs", "Monitors", "Drivers",
                ],
            ),
            category(
                "Protocols",
                &["APB", "AHB", "AXI", "Ethernet MAC", "FIFO", "Memory", "FSM"],
            ),
            category(
                "Tools",
                &["QuestaSim", "ModelSim", "GVim", "Git", "Linux shell", "Python", "C++"],
            ),
            category(
                "Domains",
                &[
                    "Digital design", "Bus protocols", "SoC-level concepts", "NoC",
                    "Fault tolerance", "Energy-efficient VLSI", "Neuromorphic",
                ],
            ),
        ],
        projects: vec![
            project(
                "configurable-memory-dv",
                "Configurable Memory DV (Front/Back-Door)",
                "Parameterized memory verified with UVM sequences and integrity checks for robust reuse",
                "Memory Verification",
                "Developed comprehensive verification environment for configurable memory with both front-door and back-door access methods.",
                &[
                    "Parameterized memory models supporting various configurations",
                    "UVM-based testbench with constrained random stimulus",
                    "Comprehensive coverage model with cross-coverage",
                    "Integrity checks and data corruption detection",
                ],
                &["UVM", "SystemVerilog", "Memory Models", "Coverage"],
            ),
            project(
                "sync-async-fifo-dv",
                "Sync/Async FIFO DV",
                "Directed and randomized scenarios covering full/empty, overflow/underflow, and wrap conditions to harden reliability",
                "FIFO Verification",
                "Built robust verification environment for both synchronous and asynchronous FIFO designs.",
                &[
                    "Comprehensive test scenarios for boundary conditions",
                    "Clock domain crossing verification for async FIFO",
                    "Overflow/underflow detection and handling",
                    "Performance and timing analysis",
                ],
                &["UVM", "SystemVerilog", "FIFO", "Assertions"],
            ),
            project(
                "sequence-detector-dv",
                "Mealy/Moore Sequence Detector DV",
                "Functional correctness validated with coverage-driven stimulus for predictable behavior",
                "FSM Verification",
                "Developed verification framework for sequence detector state machines with comprehensive FSM coverage.",
                &[
                    "State transition coverage and validation",
                    "Input sequence generation and corner cases",
                    "Output verification and timing checks",
                    "Reset and recovery behavior validation",
                ],
                &["SystemVerilog", "FSM", "Coverage", "Assertions"],
            ),
            project(
                "protocol-dv-suite",
                "APB/AHB/AXI Protocol DV",
                "Handshakes, bursts, and integrity checks to reduce late-stage integration risk",
                "Bus Protocol Verification",
                "Comprehensive protocol verification suite covering industry-standard bus protocols.",
                &[
                    "Protocol compliance checking and timing validation",
                    "Burst transaction verification and error injection",
                    "Handshake protocol validation",
                    "Multi-master and arbitration scenarios",
                ],
                &["UVM", "APB", "AHB", "AXI", "Protocol Compliance"],
            ),
            project(
                "ethernet-mac-dv",
                "Ethernet MAC DV (UVM)",
                "Register configuration, R/W access, reset handling, and end-to-end checks for robust bring-up",
                "Network Protocol",
                "Full UVM testbench for Ethernet MAC verification with comprehensive protocol coverage.",
                &[
                    "Register model integration and CSR testing",
                    "Frame transmission and reception validation",
                    "Error handling and recovery mechanisms",
                    "Performance benchmarking and stress testing",
                ],
                &["UVM", "Ethernet", "MAC", "Protocol Verification"],
            ),
            project(
                "pipelined-mips32",
                "Pipelined MIPS32 (Design + DV)",
                "Pipeline behavior and instruction execution validated across stages",
                "Processor Verification",
                "Complete design and verification of pipelined MIPS32 processor with hazard detection.",
                &[
                    "Instruction pipeline verification",
                    "Hazard detection and forwarding validation",
                    "Branch prediction accuracy testing",
                    "Performance analysis and optimization",
                ],
                &["SystemVerilog", "MIPS", "Pipeline", "Instruction Set"],
            ),
        ],
        research: vec![
            ResearchItem {
                id: ProjectId::new("accent-classification"),
                title: "Accent Classification for Bangla, Malayalam, and Telugu".to_string(),
                description: "LSTM/CNN1D implementation for accent recognition with collaborator attribution and ASR/NLP focus".to_string(),
                technologies: strings(&["LSTM", "CNN1D", "ASR", "NLP", "Python"]),
                status: ProjectStatus::Published,
                collaborators: Some(strings(&["Research Team"])),
            },
            ResearchItem {
                id: ProjectId::new("quadcopter-pid"),
                title: "Quadcopter with PID Control".to_string(),
                description: "Autonomous flight control system with PID controller implementation"
                    .to_string(),
                technologies: strings(&["PID Control", "Embedded Systems", "C++"]),
                status: ProjectStatus::Completed,
                collaborators: None,
            },
            ResearchItem {
                id: ProjectId::new("churn-ann"),
                title: "Customer Churn Prediction using ANN".to_string(),
                description:
                    "Artificial Neural Network for customer behavior analysis and churn prediction"
                        .to_string(),
                technologies: strings(&["ANN", "Machine Learning", "Python"]),
                status: ProjectStatus::Completed,
                collaborators: None,
            },
        ],
        awards: vec![
            award("NTSE State 2nd (ST)", "National Talent Search Examination", "2016"),
            award(
                "Distinction in Mathematics",
                "IAIS (International Assessment for Indian Schools)",
                "2017",
            ),
            award("Crossword Competition 1st Place", "State Level Competition", "2018"),
            award("Speech Competition 3rd Place", "Inter-college Competition", "2019"),
        ],
        training: strings(&[
            "AI/ML/DL Fundamentals",
            "Intel OpenVINO Toolkit",
            "AWS Builders Program",
            "AWS Innovate Program",
            "PCB Design and Layout",
            "STM32 Cube Programming",
            "IoT Systems Development",
            "AutoCAD Design",
            "MATLAB Programming",
            "Data Science and Analytics",
        ]),
        companies: vec![
            company("AMD", "Advanced semiconductor solutions"),
            company("NVIDIA", "AI and GPU computing leader"),
            company("Intel", "Semiconductor innovation pioneer"),
            company("Qualcomm", "Wireless technology advancement"),
            company("ARM", "Processor architecture excellence"),
            company("Infineon", "Power semiconductor solutions"),
        ],
        navigation: vec![
            nav("About", "#hero"),
            nav("Skills", "#skills"),
            nav("Projects", "#projects"),
            nav("Case Studies", "#projects"),
            nav("Research", "#research"),
            nav("Awards", "#awards"),
            nav("Contact", "#contact"),
        ],
        hero_stats: vec![
            stat("Verification Projects", "15+"),
            stat("Protocol Coverage", "98%"),
            stat("Bug Detection Rate", "99.2%"),
            stat("Reusable Components", "25+"),
        ],
        resume: default_resume(),
    }
}
