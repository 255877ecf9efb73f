use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::metadata;
use crate::firestore::value::{Fields, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    General,
    Urgent,
    Event,
}

impl NoticeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeCategory::General => "general",
            NoticeCategory::Urgent => "urgent",
            NoticeCategory::Event => "event",
        }
    }
}

pub struct NoticeTemplate {
    pub title: &'static str,
    pub message: &'static str,
    pub category: NoticeCategory,
}

pub static NOTICE_TEMPLATES: [NoticeTemplate; 15] = [
    NoticeTemplate {
        title: "General Meeting",
        message: "A general meeting will be held on Friday to discuss upcoming community projects, address resident concerns, and provide updates on estate management. Your participation is highly encouraged to ensure your voice is heard.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Urgent Maintenance",
        message: "Please be informed that the water supply will be interrupted tomorrow due to urgent maintenance work on the main pipeline. We apologize for the inconvenience and appreciate your understanding as we work to resolve the issue promptly.",
        category: NoticeCategory::Urgent,
    },
    NoticeTemplate {
        title: "Community Event",
        message: "Join us for a community BBQ this Saturday at the central park area. This is a great opportunity to meet your neighbors, enjoy delicious food, and participate in fun activities for all ages. We look forward to seeing you there!",
        category: NoticeCategory::Event,
    },
    NoticeTemplate {
        title: "Security Alert",
        message: "We urge all residents to ensure that all doors and windows are securely locked at night following recent reports of suspicious activity in the area. Your cooperation is essential in maintaining the safety and security of our community.",
        category: NoticeCategory::Urgent,
    },
    NoticeTemplate {
        title: "Holiday Notice",
        message: "Please note that the estate office will be closed on all public holidays. For any urgent matters during this time, you may contact the emergency hotline. We wish everyone a safe and enjoyable holiday season.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Fire Drill",
        message: "A fire drill is scheduled for next Monday to ensure all residents are familiar with evacuation procedures. Please take this drill seriously and follow the instructions provided by the safety team. Your cooperation is greatly appreciated.",
        category: NoticeCategory::Event,
    },
    NoticeTemplate {
        title: "Parking Update",
        message: "New parking rules will be effective from next week to improve the availability of parking spaces for all residents. Please review the updated guidelines and ensure compliance to avoid any inconvenience.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Pool Maintenance",
        message: "The community pool will be closed for maintenance from Monday to Wednesday next week. We are conducting necessary repairs and cleaning to ensure a safe and enjoyable swimming experience for all residents.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Annual HOA Meeting",
        message: "The annual HOA meeting is scheduled for June 15th at 7 PM in the community center. We will be discussing the budget for the next fiscal year and electing new board members. Your attendance is important.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Power Outage",
        message: "There will be a scheduled power outage on Saturday from 1 PM to 5 PM due to electrical grid maintenance by the utility company. Please plan accordingly and ensure sensitive electronic equipment is properly shut down before the outage.",
        category: NoticeCategory::Urgent,
    },
    NoticeTemplate {
        title: "Neighborhood Watch",
        message: "We are looking for volunteers to join our neighborhood watch program. If you are interested in helping keep our community safe, please attend the information session on Thursday at 8 PM in the community center.",
        category: NoticeCategory::Event,
    },
    NoticeTemplate {
        title: "Gardening Competition",
        message: "The annual gardening competition will begin next month. Residents are encouraged to start preparing their gardens. Prizes will be awarded for most beautiful flower garden, best vegetable garden, and most creative landscaping.",
        category: NoticeCategory::Event,
    },
    NoticeTemplate {
        title: "Pest Control",
        message: "Pest control services will be conducted in common areas on Tuesday starting at 9 AM. The treatment is pet-friendly, but we recommend keeping pets indoors during the application process as a precaution.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "New Amenities",
        message: "We are pleased to announce that the new fitness center is now open and available to all residents. The facility is equipped with state-of-the-art exercise equipment and is open daily from 5 AM to 11 PM.",
        category: NoticeCategory::General,
    },
    NoticeTemplate {
        title: "Guest Parking Reminder",
        message: "Please remember that guest parking spaces are limited to 48-hour use. Guests staying longer must register with the management office to avoid having their vehicles towed at the owner's expense.",
        category: NoticeCategory::General,
    },
];

#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub category: NoticeCategory,
    /// Backdated posting instant, also used for both metadata stamps.
    pub posted_at: DateTime<Utc>,
}

impl Notice {
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".into(), Value::string(&self.title));
        fields.insert("message".into(), Value::string(&self.message));
        fields.insert("type".into(), Value::string(self.category.as_str()));
        fields.insert("metadata".into(), metadata(self.posted_at, self.posted_at));
        fields
    }
}

/// Generate `count` notices. Requests up to the catalog size sample
/// templates without repetition; anything beyond that uses the whole
/// catalog and fills the rest with repeats. Posting instants are uniform
/// over the last 30 days, day and second-of-day drawn independently.
pub fn notices(rng: &mut impl Rng, now: DateTime<Utc>, count: usize) -> Vec<Notice> {
    let mut picks: Vec<&NoticeTemplate> = if count <= NOTICE_TEMPLATES.len() {
        NOTICE_TEMPLATES.choose_multiple(rng, count).collect()
    } else {
        let mut all: Vec<&NoticeTemplate> = NOTICE_TEMPLATES.iter().collect();
        while all.len() < count {
            all.push(&NOTICE_TEMPLATES[rng.gen_range(0..NOTICE_TEMPLATES.len())]);
        }
        all
    };
    picks.truncate(count);

    picks
        .into_iter()
        .map(|template| {
            let days = rng.gen_range(0..=30);
            let seconds = rng.gen_range(0..86_400);
            let posted_at = now - Duration::days(days) - Duration::seconds(seconds);
            Notice {
                title: template.title.to_string(),
                message: template.message.to_string(),
                category: template.category,
                posted_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_exactly_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();
        for count in [0, 1, 10, 15, 16, 40] {
            assert_eq!(notices(&mut rng, now, count).len(), count);
        }
    }

    #[test]
    fn small_requests_never_repeat_a_template() {
        let mut rng = StdRng::seed_from_u64(9);
        let now = Utc::now();
        for count in [1, 7, 15] {
            let batch = notices(&mut rng, now, count);
            let titles: HashSet<&str> = batch.iter().map(|n| n.title.as_str()).collect();
            assert_eq!(titles.len(), count);
        }
    }

    #[test]
    fn oversized_requests_use_the_whole_catalog_plus_repeats() {
        let mut rng = StdRng::seed_from_u64(9);
        let batch = notices(&mut rng, Utc::now(), 40);
        let titles: HashSet<&str> = batch.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles.len(), NOTICE_TEMPLATES.len());
    }

    #[test]
    fn posting_instants_fall_within_the_last_thirty_one_days() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        for notice in notices(&mut rng, now, 50) {
            assert!(notice.posted_at <= now);
            assert!(now - notice.posted_at <= Duration::days(31));
        }
    }
}
