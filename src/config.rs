use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

const ENV_PREFIX: &str = "CLOUDFORGE_";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Site {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub og_image: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            name: "CloudForgeOps".to_string(),
            tagline: "Freelance DevOps & Cloud Engineering".to_string(),
            description: "I design, build, and operate cloud-native infrastructure. From Kubernetes to CI/CD pipelines, I help startups ship faster and stay reliable.".to_string(),
            url: "https://cloudforgeops.com".to_string(),
            og_image: "/images/og-default.png".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub title: String,
    pub experience: String,
    pub experience_label: String,
    pub bio: String,
    pub linkedin: String,
}

impl Default for Owner {
    fn default() -> Self {
        Owner {
            name: "CloudForgeOps".to_string(),
            title: "Freelance DevOps & Cloud Engineer".to_string(),
            experience: "3+".to_string(),
            experience_label: "Hands-On Cloud & Automation Experience".to_string(),
            bio: "I work directly with founders and engineering teams to design, automate, and stabilize cloud environments across AWS and Azure.".to_string(),
            linkedin: "https://linkedin.com/company/cloudforgeops".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Contact {
    pub email: String,
}

impl Default for Contact {
    fn default() -> Self {
        Contact {
            email: "hello@cloudforgeops.com".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Social {
    pub github: String,
    pub linkedin: String,
}

impl Default for Social {
    fn default() -> Self {
        Social {
            github: "https://github.com/cloudforgeops".to_string(),
            linkedin: "https://linkedin.com/company/cloudforgeops".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FreeReview {
    pub href: String,
    pub calendly_url: String,
    pub duration: String,
    pub headline: String,
    pub subtext: String,
    pub bullets: Vec<String>,
    pub closing_note: String,
}

impl Default for FreeReview {
    fn default() -> Self {
        FreeReview {
            href: "/free-review".to_string(),
            calendly_url: "https://calendly.com/cloudforgeops/30min".to_string(),
            duration: "30 min".to_string(),
            headline: "Get a Free 30-Minute Cloud Infrastructure Review".to_string(),
            subtext: "If you're scaling your product or experiencing performance, deployment, or cost issues, I'll review your setup and provide actionable recommendations.".to_string(),
            bullets: vec![
                "Architecture risk assessment".to_string(),
                "Scaling & performance suggestions".to_string(),
                "CI/CD optimization advice".to_string(),
                "Cloud cost improvement opportunities".to_string(),
            ],
            closing_note: "No obligation. Just practical insights.".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Service {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Service {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Service {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

fn default_services() -> Vec<Service> {
    vec![
        Service::new("server", "Cloud Infrastructure", "Architecting and managing multi-cloud environments on AWS, GCP, and Azure. VPCs, IAM, compute, and storage designed for scale."),
        Service::new("box", "Kubernetes & Containers", "End-to-end Kubernetes operations: EKS, GKE, self-managed clusters, Helm, service mesh, and workload autoscaling."),
        Service::new("git-branch", "CI/CD Pipelines", "Automated delivery with GitHub Actions, Jenkins, and ArgoCD. Build once, deploy anywhere with rollback and blue/green support."),
        Service::new("code", "Infrastructure as Code", "Terraform and Ansible for reproducible, version-controlled infrastructure. Modules, state management, and drift detection baked in."),
        Service::new("bar-chart", "Monitoring & Observability", "Prometheus, Grafana, and alerting pipelines that give your team full visibility into system health before issues impact users."),
        Service::new("shield-check", "Security Engineering", "Hardened networking, secrets management, compliance guardrails, and security scanning integrated directly into your pipelines."),
    ]
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub blog_dir: PathBuf,
    pub case_studies_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Site-wide settings, read once at startup and passed to whatever
/// composes pages.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: Site,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub free_review: FreeReview,
    #[serde(default = "default_services")]
    pub services: Vec<Service>,
    pub paths: Paths,
    pub log: Option<Log>,
}

impl Config {
    /// Overrides string settings from `CLOUDFORGE_<SECTION>_<FIELD>` values.
    /// Blank values are ignored; the rest are trimmed.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: Vec<(&str, &mut String)> = vec![
            ("SITE_NAME", &mut self.site.name),
            ("SITE_TAGLINE", &mut self.site.tagline),
            ("SITE_DESCRIPTION", &mut self.site.description),
            ("SITE_URL", &mut self.site.url),
            ("SITE_OG_IMAGE", &mut self.site.og_image),
            ("CONTACT_EMAIL", &mut self.contact.email),
            ("SOCIAL_GITHUB", &mut self.social.github),
            ("SOCIAL_LINKEDIN", &mut self.social.linkedin),
            ("OWNER_NAME", &mut self.owner.name),
            ("OWNER_TITLE", &mut self.owner.title),
            ("OWNER_EXPERIENCE", &mut self.owner.experience),
            ("OWNER_EXPERIENCE_LABEL", &mut self.owner.experience_label),
            ("OWNER_BIO", &mut self.owner.bio),
            ("OWNER_LINKEDIN", &mut self.owner.linkedin),
            ("FREE_REVIEW_HREF", &mut self.free_review.href),
            ("FREE_REVIEW_DURATION", &mut self.free_review.duration),
            ("FREE_REVIEW_CALENDLY_URL", &mut self.free_review.calendly_url),
        ];

        for (key, target) in overrides {
            let name = format!("{}{}", ENV_PREFIX, key);
            if let Some(value) = lookup(&name) {
                let value = value.trim();
                if !value.is_empty() {
                    *target = value.to_string();
                }
            }
        }
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.strip_prefix("${exe_dir}")) {
        (Some(exe_dir), Ok(rest)) => exe_dir.join(rest),
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        blog_dir: parse_path(cfg.paths.blog_dir),
        case_studies_dir: parse_path(cfg.paths.case_studies_dir),
        output_dir: parse_path(cfg.paths.output_dir),
    };

    Ok(cfg)
}

/// Reads the configuration file and applies environment overrides.
pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;
    cfg.apply_env(|key| env::var(key).ok());
    Ok(cfg)
}
