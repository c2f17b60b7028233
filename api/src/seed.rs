use crate::models::NewChallenge;

/// Seeded participant counts are drawn from `0..MAX_SEED_PARTICIPANTS`.
pub const MAX_SEED_PARTICIPANTS: u64 = 50;

pub struct SeedChallenge {
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

impl SeedChallenge {
    pub fn to_new_challenge(&self) -> NewChallenge {
        NewChallenge {
            title: self.title.to_string(),
            description: self.description.to_string(),
            emoji: self.emoji.to_string(),
        }
    }
}

pub const CATALOG: [SeedChallenge; 10] = [
    SeedChallenge {
        title: "Best Parade March",
        description: "Show us your sharpest parade march! Precision, style, and energy - let's see who has the best formation.",
        emoji: "🎖️",
    },
    SeedChallenge {
        title: "Platoon Chant Battle",
        description: "Record your platoon's most creative chant! The louder and more coordinated, the better. Rep your platoon!",
        emoji: "📣",
    },
    SeedChallenge {
        title: "Funniest Camp Moment",
        description: "Capture the comedy of camp life. From mess hall mishaps to parade bloopers - make us laugh!",
        emoji: "😂",
    },
    SeedChallenge {
        title: "Man O' War Challenge",
        description: "Show off your physical training skills! Push-ups, obstacle course, or any MOW activity that showcases your strength.",
        emoji: "💪",
    },
    SeedChallenge {
        title: "Best Camp Fit",
        description: "Style meets service! Show us how you rock the white shorts and shirt. Fashion on the parade ground!",
        emoji: "👕",
    },
    SeedChallenge {
        title: "Early Morning Drill",
        description: "Capture the energy of 5 AM wake-up! Who's ready to conquer the day from the crack of dawn?",
        emoji: "🌅",
    },
    SeedChallenge {
        title: "Mess Hall Chronicles",
        description: "Document the camp food experience. From rice and stew to indomie nights - what's on your plate?",
        emoji: "🍚",
    },
    SeedChallenge {
        title: "State Pride",
        description: "Rep your state with pride! Show us what makes your state special during camp activities.",
        emoji: "🏁",
    },
    SeedChallenge {
        title: "Camper's Creativity",
        description: "Arts, crafts, or any creative expression during camp. Show us your artistic side!",
        emoji: "🎨",
    },
    SeedChallenge {
        title: "Friendship Goals",
        description: "Capture the bonds formed at camp. Tag your new friends and show us the camp family vibes!",
        emoji: "🤝",
    },
];
