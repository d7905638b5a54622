//! The built-in challenge library.

use super::challenge::{Challenge, Constraints, Difficulty, OutputFormat, TargetStyle};

fn style(formality: Option<&str>, tone: Option<&str>) -> TargetStyle {
    TargetStyle {
        formality: formality.map(Into::into),
        tone: tone.map(Into::into),
        pacing: None,
        reading_level: None,
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

pub(super) fn challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "professional_email".into(),
            title: "Professional Follow-up Email".into(),
            description: "Create a prompt that generates a professional follow-up email after a \
                business meeting. The email should be courteous, specific, and action-oriented."
                .into(),
            difficulty: Difficulty::Beginner,
            time_limit_secs: 300,
            constraints: Constraints {
                max_words: 120,
                required_keywords: keywords(&["follow-up", "action items", "meeting"]),
                target_style: style(Some("formal"), Some("professional")),
                format: Some(OutputFormat::Email),
            },
            target_response: "Thank you for taking the time to meet with me yesterday to discuss \
                the marketing campaign proposal. I wanted to follow up on the key action items we \
                identified: 1) Finalizing the budget allocation by Friday, 2) Scheduling the \
                creative review session for next week, and 3) Confirming the launch timeline for \
                Q2. I've attached the revised proposal document with the changes we discussed. \
                Please let me know if you need any additional information or clarification on any \
                of these points. I look forward to moving forward with this exciting project."
                .into(),
        },
        Challenge {
            id: "creative_story".into(),
            title: "Mystery Story Opening".into(),
            description: "Write a prompt for creating a compelling 150-word mystery story opening \
                that hooks the reader and establishes intrigue."
                .into(),
            difficulty: Difficulty::Intermediate,
            time_limit_secs: 600,
            constraints: Constraints {
                max_words: 150,
                required_keywords: keywords(&["mystery", "opening", "detective"]),
                target_style: TargetStyle {
                    pacing: Some("engaging".into()),
                    ..style(None, Some("suspenseful"))
                },
                format: Some(OutputFormat::Narrative),
            },
            target_response: "The lighthouse keeper hadn't been seen for three days. Detective \
                Sarah Martinez pulled her coat tighter as she approached the weathered door, the \
                beam above cutting through the morning fog in mechanical sweeps. The townspeople \
                whispered about strange lights and voices from the tower at night, but whispers \
                were all they offered. As she knocked, the sound echoed hollow and wrong. No \
                answer. The door creaked open at her touch, revealing a staircase that spiraled \
                into darkness. On the first step lay a compass, its needle spinning wildly, \
                pointing everywhere and nowhere at once."
                .into(),
        },
        Challenge {
            id: "technical_explanation".into(),
            title: "Explain Blockchain Simply".into(),
            description: "Create a prompt that explains blockchain technology to a 10-year-old \
                using simple language and relatable analogies."
                .into(),
            difficulty: Difficulty::Intermediate,
            time_limit_secs: 450,
            constraints: Constraints {
                max_words: 120,
                required_keywords: keywords(&["simple", "easy", "notebook"]),
                target_style: TargetStyle {
                    reading_level: Some(5),
                    ..style(Some("informal"), Some("friendly"))
                },
                format: Some(OutputFormat::Explanation),
            },
            target_response: "Imagine you and your friends have a special notebook that everyone \
                shares to keep track of trading cards. Whenever someone gives someone else a card, \
                you write it down in the notebook. But here's the cool part - everyone has their \
                own copy of the same notebook, and they all have to match perfectly! If someone \
                tries to cheat and change their notebook, everyone else will notice. That's like \
                blockchain - a way to keep track of things that's really hard to cheat on because \
                lots of computers all have the same information."
                .into(),
        },
        Challenge {
            id: "business_proposal".into(),
            title: "Investment Proposal Pitch".into(),
            description: "Craft a prompt for a persuasive business proposal presentation that \
                includes key metrics and compelling arguments for investment."
                .into(),
            difficulty: Difficulty::Advanced,
            time_limit_secs: 900,
            constraints: Constraints {
                max_words: 200,
                required_keywords: keywords(&["investment", "revenue", "market share", "technology"]),
                target_style: style(Some("formal"), Some("confident")),
                format: Some(OutputFormat::BusinessProposal),
            },
            target_response: "Our innovative EcoPackaging solution addresses the critical $12B \
                market gap in sustainable packaging, offering 40% cost reduction while achieving \
                complete carbon neutrality by 2026. With strategic $2M Series A investment, we \
                project $15M revenue by year three, capturing 5% market share in the rapidly \
                growing $50B sustainable packaging industry. Our proprietary bio-degradable \
                material technology, protected by three pending patents, provides significant \
                competitive advantages over traditional plastic alternatives."
                .into(),
        },
        Challenge {
            id: "social_media_post".into(),
            title: "Engaging Social Media Content".into(),
            description: "Create a prompt for an engaging social media post that promotes \
                environmental awareness with a clear call to action."
                .into(),
            difficulty: Difficulty::Beginner,
            time_limit_secs: 240,
            constraints: Constraints {
                max_words: 100,
                required_keywords: keywords(&["Earth Day", "sustainable", "environment"]),
                target_style: style(Some("casual"), Some("enthusiastic")),
                format: Some(OutputFormat::SocialMedia),
            },
            target_response: "Small changes, BIG impact! Did you know that switching to a \
                reusable water bottle can save 1,460 plastic bottles per year? This Earth Day, \
                let's challenge ourselves to make sustainable choices that matter. Here are 3 easy \
                ways to start: use reusable bags when shopping, choose digital receipts over \
                paper, walk or bike for short trips. What's YOUR sustainable swap this week? \
                Share in the comments and tag a friend to join the movement! #EarthDay \
                #Sustainability #ClimateAction"
                .into(),
        },
        Challenge {
            id: "customer_service".into(),
            title: "Customer Service Response".into(),
            description: "Create a helpful and empathetic customer service response to resolve a \
                billing dispute while maintaining a positive relationship."
                .into(),
            difficulty: Difficulty::Beginner,
            time_limit_secs: 360,
            constraints: Constraints {
                max_words: 140,
                required_keywords: keywords(&["apologize", "refund", "account"]),
                target_style: style(Some("polite"), Some("helpful")),
                format: Some(OutputFormat::CustomerService),
            },
            target_response: "Dear valued customer, Thank you for contacting us regarding the \
                billing concern on your account. I sincerely apologize for any confusion this may \
                have caused. I've thoroughly reviewed your account and can see that there was \
                indeed an error in our billing system that resulted in the duplicate charge you \
                mentioned. I've immediately processed a full refund of $49.99, which should appear \
                in your account within 2-3 business days. We truly value your business and \
                appreciate your patience."
                .into(),
        },
        Challenge {
            id: "recipe_instructions".into(),
            title: "Clear Recipe Instructions".into(),
            description: "Write clear, easy-to-follow instructions for making chocolate chip \
                cookies that a beginner cook could successfully use."
                .into(),
            difficulty: Difficulty::Beginner,
            time_limit_secs: 420,
            constraints: Constraints {
                max_words: 150,
                required_keywords: keywords(&["ingredients", "instructions", "bake"]),
                target_style: style(Some("instructional"), Some("clear")),
                format: Some(OutputFormat::Recipe),
            },
            target_response: "Perfect Chocolate Chip Cookies. Ingredients: 1 cup butter, 3/4 cup \
                brown sugar, 1/2 cup white sugar, 2 eggs, 2 cups flour, 1 tsp vanilla, 1/2 tsp \
                salt, 1 tsp baking soda, 1 1/2 cups chocolate chips. Instructions: 1. Preheat oven \
                to 350F. 2. Mix softened butter with both sugars until creamy. 3. Add eggs one at a \
                time, then vanilla. 4. Combine flour, salt, and baking soda. 5. Mix dry \
                ingredients into wet ingredients. 6. Stir in chocolate chips. 7. Bake 9-11 minutes \
                until edges are golden brown."
                .into(),
        },
        Challenge {
            id: "code_documentation".into(),
            title: "API Documentation".into(),
            description: "Write clear, comprehensive documentation for a REST API endpoint that \
                developers will use to integrate with your service."
                .into(),
            difficulty: Difficulty::Advanced,
            time_limit_secs: 720,
            constraints: Constraints {
                max_words: 200,
                required_keywords: keywords(&["API", "endpoint", "parameters", "response"]),
                target_style: style(Some("technical"), Some("clear")),
                format: Some(OutputFormat::Documentation),
            },
            target_response: "POST /api/users creates a new user account in the system. Request \
                parameters: username (string, required), unique, 3-50 characters; email (string, \
                required), a valid email address; password (string, required), minimum 8 \
                characters. Response: 201 Created with the new user's id, username, email and \
                creation timestamp. Error response: 400 Bad Request with an error code and a \
                message when validation fails."
                .into(),
        },
    ]
}
