use chrono::Utc;
use rand::Rng;

use super::metadata;
use crate::firestore::value::{Fields, Value};

static NAME_PREFIXES: [&str; 20] = [
    "Oak", "Maple", "Pine", "Cedar", "Willow", "Birch", "Aspen", "Elm", "Spruce", "Cypress",
    "Royal", "Grand", "Highland", "Green", "Blue", "Golden", "Silver", "Crystal", "Emerald",
    "Ruby",
];

static NAME_SUFFIXES: [&str; 19] = [
    "Park", "Gardens", "Heights", "Hills", "Meadows", "Estates", "Terrace", "Village", "Plaza",
    "Commons", "Square", "Court", "Place", "View", "Ridge", "Grove", "Manor", "Woods", "Valley",
];

static STREETS: [&str; 20] = [
    "Park Avenue",
    "Main Street",
    "Oak Road",
    "Maple Drive",
    "Pine Lane",
    "Willow Way",
    "Cedar Street",
    "Birch Road",
    "Aspen Drive",
    "Elm Street",
    "Garden Avenue",
    "Hill Road",
    "Meadow Lane",
    "River Drive",
    "Lake Road",
    "Forest Avenue",
    "Valley Lane",
    "Mountain View",
    "Sunset Drive",
    "Sunrise Lane",
];

/// Each county paired with its towns, so a generated city always belongs to
/// the generated county.
static COUNTIES: [(&str, [&str; 5]); 20] = [
    (
        "Dublin",
        ["Dublin", "Swords", "Tallaght", "Dún Laoghaire", "Blanchardstown"],
    ),
    ("Cork", ["Cork", "Carrigaline", "Cobh", "Midleton", "Mallow"]),
    ("Galway", ["Galway", "Tuam", "Ballinasloe", "Loughrea", "Oranmore"]),
    ("Mayo", ["Castlebar", "Ballina", "Westport", "Claremorris", "Ballinrobe"]),
    ("Kerry", ["Tralee", "Killarney", "Dingle", "Listowel", "Kenmare"]),
    (
        "Waterford",
        ["Waterford", "Dungarvan", "Tramore", "Lismore", "Portlaw"],
    ),
    (
        "Limerick",
        ["Limerick", "Newcastle West", "Abbeyfeale", "Kilmallock", "Adare"],
    ),
    (
        "Clare",
        ["Ennis", "Shannon", "Kilrush", "Sixmilebridge", "Newmarket-on-Fergus"],
    ),
    (
        "Tipperary",
        ["Clonmel", "Nenagh", "Thurles", "Carrick-on-Suir", "Roscrea"],
    ),
    ("Wexford", ["Wexford", "Enniscorthy", "Gorey", "New Ross", "Bunclody"]),
    ("Wicklow", ["Bray", "Greystones", "Arklow", "Wicklow", "Blessington"]),
    ("Kildare", ["Naas", "Newbridge", "Leixlip", "Maynooth", "Athy"]),
    ("Meath", ["Navan", "Ashbourne", "Trim", "Laytown", "Ratoath"]),
    ("Louth", ["Drogheda", "Dundalk", "Ardee", "Termonfeckin", "Clogherhead"]),
    (
        "Donegal",
        ["Letterkenny", "Buncrana", "Ballybofey", "Donegal", "Bundoran"],
    ),
    ("Sligo", ["Sligo", "Strandhill", "Ballymote", "Tubbercurry", "Enniscrone"]),
    (
        "Roscommon",
        ["Roscommon", "Boyle", "Castlerea", "Ballaghaderreen", "Strokestown"],
    ),
    (
        "Westmeath",
        ["Athlone", "Mullingar", "Moate", "Kilbeggan", "Castlepollard"],
    ),
    ("Offaly", ["Tullamore", "Birr", "Edenderry", "Clara", "Banagher"]),
    (
        "Kilkenny",
        ["Kilkenny", "Callan", "Castlecomer", "Thomastown", "Graiguenamanagh"],
    ),
];

#[derive(Debug, Clone)]
pub struct Estate {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub county: String,
    pub logo_url: Option<String>,
}

impl Estate {
    pub fn to_fields(&self) -> Fields {
        let now = Utc::now();
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::string(&self.name));
        fields.insert("description".into(), Value::string(&self.description));
        fields.insert("address".into(), Value::string(&self.address));
        fields.insert("city".into(), Value::string(&self.city));
        fields.insert("county".into(), Value::string(&self.county));
        if let Some(logo) = &self.logo_url {
            fields.insert("logoUrl".into(), Value::string(logo));
        }
        fields.insert("metadata".into(), metadata(now, now));
        fields
    }
}

/// Generate `count` estates with plausible Irish locations.
pub fn estates(rng: &mut impl Rng, count: usize) -> Vec<Estate> {
    (0..count)
        .map(|_| {
            let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
            let suffix = NAME_SUFFIXES[rng.gen_range(0..NAME_SUFFIXES.len())];
            let name = format!("{prefix} {suffix}");

            let (county, towns) = COUNTIES[rng.gen_range(0..COUNTIES.len())];
            let city = towns[rng.gen_range(0..towns.len())];
            let address = format!(
                "{} {}",
                rng.gen_range(1..=100),
                STREETS[rng.gen_range(0..STREETS.len())]
            );

            let description = match rng.gen_range(0..5) {
                0 => format!(
                    "A beautiful {} community in the heart of {city}.",
                    suffix.to_lowercase()
                ),
                1 => format!("Modern living in the prestigious {name} development."),
                2 => format!("Experience luxury community living at {name}."),
                3 => format!("A peaceful {} retreat in {county}.", suffix.to_lowercase()),
                _ => format!("Family-friendly community in the scenic area of {city}."),
            };

            let logo_url = rng.gen_bool(0.4).then(|| {
                format!(
                    "https://example.com/logos/{}_{}.png",
                    prefix.to_lowercase(),
                    suffix.to_lowercase()
                )
            });

            Estate {
                name,
                description,
                address,
                city: city.to_string(),
                county: county.to_string(),
                logo_url,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_exactly_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(estates(&mut rng, 0).len(), 0);
        assert_eq!(estates(&mut rng, 3).len(), 3);
        assert_eq!(estates(&mut rng, 30).len(), 30);
    }

    #[test]
    fn cities_always_belong_to_their_county() {
        let mut rng = StdRng::seed_from_u64(13);
        for estate in estates(&mut rng, 100) {
            let towns = COUNTIES
                .iter()
                .find(|(county, _)| *county == estate.county)
                .map(|(_, towns)| towns)
                .expect("county from the fixed table");
            assert!(towns.contains(&estate.city.as_str()));
        }
    }

    #[test]
    fn names_and_addresses_come_from_the_word_tables() {
        let mut rng = StdRng::seed_from_u64(99);
        for estate in estates(&mut rng, 50) {
            let (prefix, suffix) = estate.name.split_once(' ').expect("two-part name");
            assert!(NAME_PREFIXES.contains(&prefix));
            assert!(NAME_SUFFIXES.contains(&suffix));
            let (number, street) = estate.address.split_once(' ').expect("number then street");
            let number: u32 = number.parse().expect("house number");
            assert!((1..=100).contains(&number));
            assert!(STREETS.contains(&street));
            assert!(!estate.description.is_empty());
        }
    }

    #[test]
    fn logos_are_optional() {
        let mut rng = StdRng::seed_from_u64(4);
        let batch = estates(&mut rng, 100);
        let with_logo = batch.iter().filter(|e| e.logo_url.is_some()).count();
        assert!(with_logo > 0 && with_logo < batch.len());
    }
}
