//! Motivational messages shown on the dashboard

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// A single motivational message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Motivation {
    pub message: &'static str,
}

pub static MOTIVATIONS: [Motivation; 8] = [
    Motivation {
        message: "You are stronger than you think.",
    },
    Motivation {
        message: "Small steps every day still move you forward.",
    },
    Motivation {
        message: "Your feelings are valid.",
    },
    Motivation {
        message: "Breathe. You’re doing your best.",
    },
    Motivation {
        message: "You’ve survived every hard day so far—you can handle this one too.",
    },
    Motivation {
        message: "Small victories count. Celebrate them.",
    },
    Motivation {
        message: "Your mental health matters more than the expectations of others.",
    },
    Motivation {
        message: "It’s okay to feel lost. Healing often begins in the dark.",
    },
];

/// Pick one message uniformly at random
pub fn random_motivation<R: Rng + ?Sized>(rng: &mut R) -> &'static Motivation {
    // MOTIVATIONS is never empty
    MOTIVATIONS.choose(rng).unwrap_or(&MOTIVATIONS[0])
}
