//! Static educational content

/// One lesson card
pub struct Lesson {
    pub title: &'static str,
    pub body: &'static str,
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        title: "The house edge",
        body: "Every game is configured so that, over many rounds, the operator keeps a \
               share of everything wagered. A 12% edge means that on average you lose 12 \
               chips of every 100 you bet. Short winning streaks do not change the average.",
    },
    Lesson {
        title: "Near misses",
        body: "Two matching symbols feel like 'almost winning', but they pay exactly the \
               same as any other loss. In a three-reel game they come up far more often \
               than real wins, which keeps players spinning.",
    },
    Lesson {
        title: "Chasing losses",
        body: "Raising bets to win back what you lost increases how fast the edge eats your \
               balance. Losses are not 'due' to turn around: every spin is independent.",
    },
    Lesson {
        title: "What it really costs",
        body: "Many people caught in gambling end up selling their valuables or borrowing \
               money to cover losses. Picture the things you could lose, like your phone, \
               motorbike or laptop, and ask whether a spin is worth them.",
    },
    Lesson {
        title: "Designed for continued play",
        body: "Animations, sounds and occasional small wins are there to make you keep \
               playing. The longer the session, the closer your result gets to the house edge.",
    },
];

pub const QUIT_TIPS: &[&str] = &[
    "Set a hard time and money limit before you start, and stop when you reach either.",
    "Delete gambling apps and block gambling sites on your devices.",
    "Tell someone you trust and ask them to hold you accountable.",
    "Replace the habit with another activity at the times you usually play.",
    "Track how much you have lost so far. The number is usually larger than it feels.",
];

pub const HELP_LINE: &str = "If gambling is hurting you or someone close to you, reach out to a \
                             local counseling service or health hotline. You are not alone.";

/// Full text printed by `edgewise learn`
pub fn render() -> String {
    let mut out = String::from("📚 HOW GAMBLING GAMES ARE BUILT TO WIN\n\n");
    for (i, lesson) in LESSONS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   {}\n\n", i + 1, lesson.title, lesson.body));
    }
    out.push_str("💡 TIPS FOR STOPPING\n");
    for tip in QUIT_TIPS {
        out.push_str(&format!(" - {tip}\n"));
    }
    out.push_str(&format!("\n📞 {HELP_LINE}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_every_lesson() {
        let text = render();
        for lesson in LESSONS {
            assert!(text.contains(lesson.title));
        }
        assert!(text.contains("1. The house edge"));
        assert!(text.contains("selling their valuables or borrowing"));
        assert!(text.contains("phone, motorbike or laptop"));
        assert!(text.contains(HELP_LINE));
    }
}
