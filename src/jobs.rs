use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

/// Where the work happens.
///
/// Modeled as a three-way variant instead of an `{is_remote, is_hybrid}` flag
/// pair so the both-flags-set case is unrepresentable past the intake
/// boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WorkLocation {
    Remote,
    Hybrid,
    OnSite,
}

impl WorkLocation {
    /// Collapse a legacy flag pair into a variant. Remote takes precedence
    /// over hybrid, matching how upstream job feeds resolved the overlap.
    #[allow(dead_code)]
    pub fn from_flags(is_remote: bool, is_hybrid: bool) -> Self {
        if is_remote {
            WorkLocation::Remote
        } else if is_hybrid {
            WorkLocation::Hybrid
        } else {
            WorkLocation::OnSite
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkLocation::Remote => "Remote",
            WorkLocation::Hybrid => "Hybrid",
            WorkLocation::OnSite => "On-site",
        }
    }

    /// Glyph shown next to the work-location tag on a job card.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkLocation::Remote | WorkLocation::Hybrid => "🏠",
            WorkLocation::OnSite => "🏢",
        }
    }
}

/// A consultant attached to a role, bookable by the hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultant {
    pub name: String,
    pub avatar: String,
    pub experience: String,
    pub hourly_rate: u32,
    pub booking_url: String,
}

/// One job record as shown on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub employment_type: String,
    pub work_location: WorkLocation,
    pub highlights: Vec<String>,
    pub apply_url: String,
    #[serde(default)]
    pub consultants: Vec<Consultant>,
}

/// Seed records for the board. A production deployment would pull these from
/// the listings service.
pub fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            id: Uuid::new_v4(),
            title: "Senior Product Manager".to_string(),
            company: "Northwind Labs".to_string(),
            location: "San Francisco, CA".to_string(),
            salary: "$165k - $195k".to_string(),
            employment_type: "Full-time".to_string(),
            work_location: WorkLocation::Hybrid,
            highlights: vec![
                "Own the roadmap for a product used by 2M+ job seekers".to_string(),
                "Partner directly with design and data science leads".to_string(),
                "Quarterly travel to the Austin office".to_string(),
            ],
            apply_url: "https://jobs.northwindlabs.example/senior-pm".to_string(),
            consultants: vec![
                Consultant {
                    name: "Priya Raman".to_string(),
                    avatar: "avatars/priya.png".to_string(),
                    experience: "8 yrs PM at marketplace startups".to_string(),
                    hourly_rate: 90,
                    booking_url: "https://book.rolearc.example/priya".to_string(),
                },
                Consultant {
                    name: "Marcus Cole".to_string(),
                    avatar: "avatars/marcus.png".to_string(),
                    experience: "Ex-FAANG group PM, 12 yrs".to_string(),
                    hourly_rate: 140,
                    booking_url: "https://book.rolearc.example/marcus".to_string(),
                },
            ],
        },
        Job {
            id: Uuid::new_v4(),
            title: "Software Engineer, Backend".to_string(),
            company: "Harbor Systems".to_string(),
            location: "Remote (US)".to_string(),
            salary: "$140k - $170k".to_string(),
            employment_type: "Full-time".to_string(),
            work_location: WorkLocation::Remote,
            highlights: vec![
                "Rust and Go services handling 40k req/s".to_string(),
                "Small team, high ownership, no on-call rotation yet".to_string(),
            ],
            apply_url: "https://harborsystems.example/careers/backend".to_string(),
            consultants: vec![Consultant {
                name: "Dana Whitfield".to_string(),
                avatar: "avatars/dana.png".to_string(),
                experience: "Staff engineer, distributed systems".to_string(),
                hourly_rate: 110,
                booking_url: "https://book.rolearc.example/dana".to_string(),
            }],
        },
        Job {
            id: Uuid::new_v4(),
            title: "Product Design Intern".to_string(),
            company: "Brightline".to_string(),
            location: "New York, NY".to_string(),
            salary: "$38/hr".to_string(),
            employment_type: "Internship".to_string(),
            work_location: WorkLocation::OnSite,
            highlights: vec![
                "Ship real features alongside a senior design mentor".to_string(),
                "Portfolio review and return-offer track".to_string(),
            ],
            apply_url: "https://brightline.example/interns/design".to_string(),
            consultants: Vec::new(),
        },
    ]
}
