//! Fixed skill vocabularies used for keyword matching.
//!
//! All terms are lowercase single tokens so they compare directly against
//! normalized text. A term only becomes "required" for a given analysis
//! when it also appears in the job description, so these lists can stay
//! broad without inflating scores.

/// Technical skills: languages, frameworks, infrastructure, data tooling.
pub const HARD_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "golang",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "cpp",
    "csharp",
    "sql",
    "nosql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "svelte",
    "node",
    "nodejs",
    "express",
    "django",
    "flask",
    "rails",
    "spring",
    "laravel",
    "dotnet",
    "aws",
    "azure",
    "gcp",
    "cloud",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "git",
    "github",
    "gitlab",
    "linux",
    "bash",
    "mongodb",
    "postgresql",
    "postgres",
    "mysql",
    "redis",
    "elasticsearch",
    "kafka",
    "rabbitmq",
    "graphql",
    "rest",
    "grpc",
    "microservices",
    "api",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "spark",
    "hadoop",
    "tableau",
    "excel",
    "figma",
    "jira",
    "agile",
    "scrum",
    "devops",
    "selenium",
    "cypress",
];

/// Interpersonal and behavioral skills.
pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "collaboration",
    "collaborative",
    "adaptability",
    "creativity",
    "initiative",
    "ownership",
    "mentoring",
    "mentorship",
    "motivated",
    "proactive",
    "organized",
    "analytical",
    "negotiation",
    "presentation",
    "prioritization",
    "accountability",
    "empathy",
    "curiosity",
    "resilience",
    "flexibility",
    "interpersonal",
    "dependable",
];
