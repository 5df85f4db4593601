use super::{QuizAnswers, QuizKey};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendation {
    pub empathy: String,
    pub routine_steps: Vec<String>,
    pub ingredient_notes: Vec<String>,
    pub cautions: Vec<String>,
    pub reassurance: Vec<String>,
    pub climate_tip: Option<String>,
}

impl Recommendation {
    pub fn render(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        if !self.empathy.is_empty() {
            sections.push(self.empathy.clone());
        }
        if !self.routine_steps.is_empty() {
            sections.push(self.routine_steps.join("\n"));
        }
        if let Some(tip) = &self.climate_tip {
            sections.push(tip.clone());
        }
        for lines in [&self.ingredient_notes, &self.cautions, &self.reassurance] {
            if !lines.is_empty() {
                sections.push(lines.join("\n"));
            }
        }
        sections.join("\n\n")
    }

    fn step(&mut self, text: &str) {
        self.routine_steps.push(text.to_string());
    }

    fn note(&mut self, text: &str) {
        self.ingredient_notes.push(text.to_string());
    }

    fn caution(&mut self, text: impl Into<String>) {
        self.cautions.push(text.into());
    }

    fn reassure(&mut self, text: &str) {
        self.reassurance.push(text.to_string());
    }
}

// Stage order is part of the output contract.
pub fn evaluate(answers: &QuizAnswers) -> Recommendation {
    let mut out = Recommendation::default();
    let skin_type = answers.get(QuizKey::SkinType).unwrap_or_default();
    let concern = answers.get(QuizKey::Concern).unwrap_or_default();

    apply_skin_type(&mut out, skin_type, concern);
    apply_concern(&mut out, concern);

    if answers.get(QuizKey::Sun) == Some("A lot") {
        out.step("Extra SPF protection");
        out.note("Zinc oxide and titanium dioxide sit on the skin and reflect UV rays.");
        out.caution(
            "Use acids and retinoids at night and keep the morning for sunscreen, \
             since both raise sun sensitivity.",
        );
    }

    let climate = answers.get(QuizKey::Climate).unwrap_or_default();
    match climate {
        "Humid" => out.step("Optional: mattifying primer"),
        "Dry" => out.step("Optional: hydrating face mist"),
        _ => {}
    }
    out.climate_tip = climate_tip(climate).map(str::to_string);

    if answers.get(QuizKey::Sleep) == Some("Poor") {
        out.reassure(
            "Poor sleep shows on the skin, but even small gains in rest help your routine work.",
        );
    }
    if answers.get(QuizKey::Diet) == Some("Needs improvement") {
        out.reassure("More water, fruit and vegetables will support your skin from the inside.");
    }

    if let Some(allergy) = answers.get(QuizKey::Allergies).filter(|value| *value != "No") {
        out.caution(format!(
            "You mentioned a {} allergy: patch test new products and read ingredient lists carefully.",
            allergy.to_lowercase()
        ));
    }

    if matches!(answers.get(QuizKey::Age), Some("36-50") | Some("51+")) {
        out.reassure("Skin changes with age, and it is never too late to start a routine that works.");
    }

    out
}

fn apply_skin_type(out: &mut Recommendation, skin_type: &str, concern: &str) {
    match skin_type {
        "Sensitive" => {
            out.empathy = "Sensitive skin deserves extra kindness, and you are in the right place."
                .to_string();
            out.step("Gentle fragrance-free cleanser");
            out.step("Calming moisturizer");
            out.step("Mineral sunscreen");
            out.note("Ceramides, oat and centella keep a reactive barrier calm.");
        }
        "Oily" => {
            out.empathy =
                "Oily skin can feel like a daily battle, but it tends to age gracefully.".to_string();
            out.step("Foaming gel cleanser");
            out.step("Oil-free moisturizer");
            out.step("Lightweight gel sunscreen");
            out.note("Niacinamide balances oil without stripping the skin.");
            if concern == "Acne" || concern == "None" {
                out.step("Spot treatment with benzoyl peroxide");
                out.note("Benzoyl peroxide targets breakout bacteria; dab it on active spots only.");
            }
        }
        "Dry" => {
            out.empathy =
                "Dry skin can feel tight and uncomfortable; let's bring the comfort back.".to_string();
            out.step("Creamy hydrating cleanser");
            out.step("Rich barrier moisturizer");
            out.step("Hydrating sunscreen");
            out.note("Hyaluronic acid and ceramides pull moisture in and lock it there.");
        }
        _ => {
            out.empathy =
                "Your skin is in a good place, and a steady routine will keep it there.".to_string();
            out.step("Gentle gel cleanser");
            out.step("Lightweight moisturizer");
            out.step("Broad-spectrum SPF 30 sunscreen");
            out.note("Glycerin and squalane keep balanced skin comfortable.");
        }
    }
}

fn apply_concern(out: &mut Recommendation, concern: &str) {
    match concern {
        "Acne" => {
            out.step("Spot treatment with salicylic acid");
            out.note("Salicylic acid clears pores from the inside out.");
            out.reassure("Breakouts are common at every age and respond well to consistent care.");
        }
        "Wrinkles" => {
            out.step("Retinol night serum");
            out.note("Retinol speeds up cell turnover to soften fine lines.");
            out.caution(
                "Retinol makes skin more sensitive to the sun, so limit daytime sun exposure.",
            );
            out.reassure("Fine lines are part of a life well lived, and steady care softens them.");
        }
        "Dark Spots" => {
            out.step("Vitamin C serum in the morning");
            out.note("Vitamin C brightens and fades dark spots over time.");
            out.reassure("Dark spots fade slowly; give your routine eight to twelve weeks.");
        }
        "Redness" => {
            out.step("Soothing azelaic acid serum");
            out.note("Azelaic acid calms visible redness.");
            out.reassure("Redness often settles once the skin barrier is supported.");
        }
        "Dryness" => {
            out.step("Hyaluronic acid serum on damp skin");
            out.note("Hyaluronic acid draws water into the skin.");
            out.reassure("Dryness usually eases within days of adding hydration.");
        }
        _ => {}
    }
}

fn climate_tip(climate: &str) -> Option<&'static str> {
    match climate {
        "Humid" => Some("Climate tip: in humid air, lightweight gel textures will not feel heavy."),
        "Dry" => Some("Climate tip: in dry air, layer hydration and run a humidifier at night."),
        "Cold" => Some("Climate tip: in the cold, a richer cream and a scarf protect your barrier."),
        "Hot" => Some("Climate tip: in the heat, reapply sunscreen often and keep a cooling mist handy."),
        _ => None,
    }
}
