//! Word pools for synthetic names, emails and review text.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Lisa", "Matthew", "Nancy", "Anthony", "Sandra", "Mark",
    "Ashley", "Steven", "Emily", "Andrew", "Michelle", "Joshua", "Amanda", "Kevin", "Melissa",
    "Brian", "Stephanie", "Priya", "Wei", "Carlos", "Fatima", "Kenji", "Ana", "Olga", "Mateo",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Nguyen", "Patel", "Kim", "Chen", "Tanaka", "Novak", "Silva", "Kowalski",
];

pub const FREE_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

pub const COMPANIES: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Hooli", "Vandelay", "Soylent",
    "Wonka", "Cyberdyne", "Tyrell", "Aperture", "Gringotts", "Pied Piper", "Dunder Mifflin",
    "Oceanic", "Monarch", "Massive Dynamic", "Blue Sun",
];

pub const PRODUCT_WORDS: &[&str] = &[
    "Lamp", "Blender", "Headphones", "Jacket", "Novel", "Puzzle", "Racket", "Serum", "Kettle",
    "Backpack", "Speaker", "Sneakers", "Notebook", "Drone", "Yoga", "Candle", "Charger", "Scarf",
    "Atlas", "Telescope", "Mixer", "Lotion", "Helmet", "Blocks", "Monitor", "Pillow", "Gloves",
];

pub const REVIEW_ADJECTIVES: &[&str] = &[
    "great", "terrible", "excellent", "poor", "decent", "fantastic", "awful", "amazing",
];

pub const SENTENCE_WORDS: &[&str] = &[
    "quality", "arrived", "quickly", "packaging", "would", "recommend", "again", "price",
    "value", "works", "expected", "daily", "broke", "after", "week", "color", "size", "fits",
    "perfectly", "customer", "service", "helpful", "cheap", "sturdy", "gift", "family", "loves",
    "battery", "lasts", "long", "returned", "disappointed", "exactly", "described", "better",
];
