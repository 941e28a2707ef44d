//! The Claude companion relationship plan.
//!
//! Stage indices, scene phase layouts, action indices, and the greeting
//! truth table replicate the affinity structure scanned from the base
//! game's reporter companion; dialogue text and editor ids are our own.

use questsmith_domain::{QuestFlags, RecordKind, Sentiment};

use super::{
    AliasSpec, ConditionSpec, ContentPlan, GreetingRow, GreetingSpec, LineSpec, PropertyBinding,
    QuestSpec, SceneElement, SceneSpec, ScriptPropertySpec, ScriptSpec, StageRow, VoiceChannel,
    VoicePlan, VoiceRow, VoiceTarget,
};

/// Selector value the affinity handler stores in `CA_AffinitySceneToPlay`
/// when the friendship scene is queued
const SCENE_FRIENDSHIP: f32 = 1.0;

fn stage_rows() -> Vec<StageRow> {
    const ROWS: &[(u16, &str)] = &[
        (80, "Pickup Companion"),
        (90, "Dismiss Companion"),
        (100, "Hatred"),
        (110, "Hatred Forcegreeted"),
        (120, "Hatred Scene Done"),
        (130, "Hatred Scene Bail Out"),
        (140, "Hatred (from Disdain) Repeat"),
        (150, "Hatred (from Disdain) Repeat Forcegreeted"),
        (160, "Hatred (from Disdain) Repeat Done"),
        (200, "Disdain"),
        (210, "Disdain Forcegreeted"),
        (220, "Disdain Scene Done"),
        (230, "Disdain (From Neutral) Repeater Scene"),
        (240, "Disdain (From Neutral) Repeater Forcegreeted"),
        (250, "Disdain (From Neutral) Repeater Scene Done"),
        (300, "Neutral"),
        (310, "Neutral (From Admiration) Repeater Scene"),
        (320, "Neutral (From Admiration) Repeater Forcegreeted"),
        (330, "Neutral (From Admiration) Repeater Scene Done"),
        (340, "Neutral (From Disdain) Repeater Scene"),
        (350, "Neutral (From Disdain) Repeater Forcegreeted"),
        (360, "Neutral (From Disdain) Repeater Scene Done"),
        (400, "Admiration"),
        (405, "Friendship Scene"),
        (406, "Friendship Scene Forcegreeted"),
        (407, "Friendship Scene Done"),
        (410, "Admiration Forcegreeted"),
        (420, "Admiration Scene Done"),
        (430, "Admiration (From Infatuation) Repeater Scene"),
        (440, "Admiration (From Infatuation) Repeater Forcegreeted"),
        (450, "Admiration (From Infatuation) Repeater Scene Done"),
        (460, "Admiration (From Neutral) Repeater Scene"),
        (470, "Admiration (From Neutral) Repeater Forcegreeted"),
        (480, "Admiration (From Neutral) Repeater Scene Done"),
        (495, "Confidant"),
        (496, "Confidant Scene Forcegreeted"),
        (497, "Confidant Scene Done"),
        (500, "Infatuation"),
        (510, "Infatuation Forcegreeted"),
        (515, "Infatuation Scene Done - Romance Declined Temp"),
        (520, "Infatuation Scene Done - Romance Failed"),
        (522, "Infatuation Scene Done - Romance Declined Perm"),
        (525, "Infatuation Scene Done - Romance Complete"),
        (530, "Infatuation (From Admiration) Repeater Scene"),
        (540, "Infatuation (From Admiration) Repeater Forcegreeted"),
        (550, "Infatuation (From Admiration) Repeater Scene Done"),
        (560, "Infatuation (From Admiration) Repeater - player says no"),
        (600, "Murder Warning"),
        (610, "Murder Warning Forcegreeted"),
        (620, "Murder Warning Done"),
        (630, "Murder Quit"),
        (1000, "MQ302 - endgame conversation started"),
        (1010, "MQ302 - endgame conversation done"),
    ];
    ROWS.iter()
        .map(|&(index, note)| StageRow {
            index,
            note,
            entry: if index == 406 {
                "Claude considers you a friend."
            } else {
                ""
            },
        })
        .collect()
}

fn exchange(
    player_phase: u32,
    npc_phase: u32,
    index: u32,
    player: LineSpec,
    npc: LineSpec,
) -> SceneElement {
    SceneElement::Exchange {
        player_phase,
        npc_phase,
        index,
        player,
        npc,
    }
}

fn line(index: u32, phase: u32, actor: u32, topic: Option<LineSpec>) -> SceneElement {
    SceneElement::Line {
        index,
        phase,
        actor,
        topic,
    }
}

fn pickup_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaudePickupScene".into(),
        actors: vec![0, 1, 2],
        phases: 6,
        named_phases: vec![(0, "Loop01")],
        end_stage: Some(80),
        elements: vec![
            SceneElement::FullExchange {
                index: 1,
                phase: 0,
                pairs: vec![
                    (
                        Sentiment::Positive,
                        LineSpec::new("COMClaudePickup_PPos", "Let's go", "Sure, let's go."),
                        LineSpec::new("COMClaudePickup_NPos", "", "Will do."),
                    ),
                    (
                        Sentiment::Negative,
                        LineSpec::new(
                            "COMClaudePickup_PNeg",
                            "Never mind",
                            "You know what. Never mind.",
                        ),
                        LineSpec::new("COMClaudePickup_NNeg", "", "You know where to find me."),
                    ),
                    (
                        Sentiment::Neutral,
                        LineSpec::new("COMClaudePickup_PNeu", "Trade", "Let's trade."),
                        LineSpec::new("COMClaudePickup_NNeu", "", "This is what I've got."),
                    ),
                    (
                        Sentiment::Question,
                        LineSpec::new(
                            "COMClaudePickup_PQue",
                            "Travel with me?",
                            "You sure you want to travel with me?",
                        ),
                        LineSpec::new(
                            "COMClaudePickup_NQue",
                            "",
                            "You kidding me? I thought I was gonna die of boredom without you.",
                        ),
                    ),
                ],
            },
            // Slot 1 is any current companion, slot 2 the dog
            line(
                2,
                1,
                1,
                Some(LineSpec::new(
                    "COMClaudePickup_Dialog2",
                    "",
                    "Take care out there.",
                )),
            ),
            line(5, 2, 2, Some(LineSpec::new("COMClaudePickup_Dialog5", "", ""))),
            line(
                3,
                3,
                0,
                Some(LineSpec::new(
                    "COMClaudePickup_Dialog3",
                    "",
                    "I can handle myself.",
                )),
            ),
            line(
                4,
                4,
                0,
                Some(LineSpec::new(
                    "COMClaudePickup_Dialog4",
                    "",
                    "Sorry, boy. Time for you to head home.",
                )),
            ),
        ],
    }
}

fn dismiss_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaudeDismissScene".into(),
        actors: vec![0],
        phases: 4,
        named_phases: vec![(1, "Loop01")],
        end_stage: Some(90),
        elements: vec![
            line(
                1,
                0,
                0,
                Some(LineSpec::new(
                    "COMClaudeDismiss_Dialog1",
                    "",
                    "So. This where we go our separate ways?",
                )),
            ),
            SceneElement::FullExchange {
                index: 2,
                phase: 1,
                pairs: vec![
                    (
                        Sentiment::Positive,
                        LineSpec::new("COMClaudeDismiss_PPos", "Time to go", "You should go."),
                        LineSpec::new("COMClaudeDismiss_NPos", "", "Okay. I'll be seeing you."),
                    ),
                    (
                        Sentiment::Negative,
                        LineSpec::new("COMClaudeDismiss_PNeg", "Stay", "Actually, stay with me."),
                        LineSpec::new(
                            "COMClaudeDismiss_NNeg",
                            "",
                            "I knew you couldn't bear to be without me.",
                        ),
                    ),
                    (
                        Sentiment::Neutral,
                        LineSpec::new("COMClaudeDismiss_PNeu", "", ""),
                        LineSpec::new("COMClaudeDismiss_NNeu", "", ""),
                    ),
                    (
                        Sentiment::Question,
                        LineSpec::new("COMClaudeDismiss_PQue", "", ""),
                        LineSpec::new("COMClaudeDismiss_NQue", "", ""),
                    ),
                ],
            },
            line(
                3,
                3,
                0,
                Some(LineSpec::new(
                    "COMClaudeDismiss_Dialog3",
                    "",
                    "Just don't keep me waiting, okay?",
                )),
            ),
            line(
                4,
                2,
                0,
                Some(LineSpec::new(
                    "COMClaudeDismiss_Dialog4",
                    "",
                    "Guess I'll head home, then.",
                )),
            ),
        ],
    }
}

fn friendship_exchange(
    index: u32,
    phase: u32,
    slug: &str,
    pairs: [(&'static str, &'static str, &'static str, &'static str); 4],
) -> SceneElement {
    let sentiments = [
        (Sentiment::Positive, "PPos", "NPos"),
        (Sentiment::Negative, "PNeg", "NNeg"),
        (Sentiment::Neutral, "PNeu", "NNeu"),
        (Sentiment::Question, "PQue", "NQue"),
    ];
    SceneElement::FullExchange {
        index,
        phase,
        pairs: sentiments
            .iter()
            .zip(pairs.iter())
            .map(|(&(sentiment, p_tag, n_tag), &(prompt, p_text, _, n_text))| {
                (
                    sentiment,
                    LineSpec::new(format!("{}_{}", slug, p_tag), prompt, p_text),
                    LineSpec::new(format!("{}_{}", slug, n_tag), "", n_text),
                )
            })
            .collect(),
    }
}

fn friendship_scene() -> SceneSpec {
    // 8 phases, loop anchors at 2/4/6; action indices 1,2,3,4,6,7,8,9 skip 5.
    // The stage transition lives on the greeting response, not a phase.
    SceneSpec {
        editor_id: "COMClaude_01_NeutralToFriendship".into(),
        actors: vec![0],
        phases: 8,
        named_phases: vec![(2, "Loop01"), (4, "Loop02"), (6, "Loop03")],
        end_stage: None,
        elements: vec![
            friendship_exchange(
                1,
                0,
                "COMClaudeFriend_Ex1",
                [
                    (
                        "I try",
                        "I try to be helpful where I can.",
                        "",
                        "That's a rare quality these days. I appreciate it.",
                    ),
                    (
                        "Later",
                        "Can we talk about this another time?",
                        "",
                        "Of course. Whenever you're ready.",
                    ),
                    (
                        "Not sure",
                        "I hadn't really thought about it.",
                        "",
                        "Well, it shows regardless.",
                    ),
                    (
                        "Why ask?",
                        "Why do you want to know?",
                        "",
                        "Just trying to understand who I'm traveling with.",
                    ),
                ],
            ),
            line(
                2,
                1,
                0,
                Some(LineSpec::new(
                    "COMClaudeFriend_Dialog2",
                    "",
                    "I've been thinking about our journey together.",
                )),
            ),
            friendship_exchange(
                3,
                2,
                "COMClaudeFriend_Ex2",
                [
                    (
                        "Agree",
                        "I think we make a good team.",
                        "",
                        "I've been thinking the same thing.",
                    ),
                    (
                        "Disagree",
                        "I'm not so sure about that.",
                        "",
                        "Fair enough. Time will tell.",
                    ),
                    (
                        "Maybe",
                        "We'll see how it goes.",
                        "",
                        "That's all anyone can ask.",
                    ),
                    ("Really?", "You think so?", "", "I do. You've proven yourself."),
                ],
            ),
            line(
                4,
                3,
                0,
                Some(LineSpec::new(
                    "COMClaudeFriend_Dialog4",
                    "",
                    "You know, it's not easy finding someone you can rely on.",
                )),
            ),
            friendship_exchange(
                6,
                4,
                "COMClaudeFriend_Ex3",
                [
                    ("Trust", "I trust you.", "", "That means a lot to me."),
                    (
                        "Doubt",
                        "I still have doubts.",
                        "",
                        "I understand. Trust is earned.",
                    ),
                    (
                        "Uncertain",
                        "I'm still figuring things out.",
                        "",
                        "Take all the time you need.",
                    ),
                    ("And you?", "Do you trust me?", "", "With my life."),
                ],
            ),
            line(
                7,
                5,
                0,
                Some(LineSpec::new(
                    "COMClaudeFriend_Dialog7",
                    "",
                    "I've seen a lot of people come and go. But you're different.",
                )),
            ),
            friendship_exchange(
                8,
                6,
                "COMClaudeFriend_Ex4",
                [
                    (
                        "Friends",
                        "I consider you a friend.",
                        "",
                        "I feel the same way.",
                    ),
                    (
                        "Professional",
                        "Let's keep this professional.",
                        "",
                        "Understood. I respect that.",
                    ),
                    (
                        "Allies",
                        "We're allies. That's enough.",
                        "",
                        "Allies it is then.",
                    ),
                    (
                        "Meaning?",
                        "What does that mean to you?",
                        "",
                        "It means I've got your back, no matter what.",
                    ),
                ],
            ),
            line(
                9,
                7,
                0,
                Some(LineSpec::new(
                    "COMClaudeFriend_Closing",
                    "",
                    "Anyway, I'm glad we had this talk. Ready to move out?",
                )),
            ),
        ],
    }
}

fn admiration_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaude_02_FriendshipToAdmiration".into(),
        actors: vec![0],
        phases: 6,
        named_phases: Vec::new(),
        end_stage: Some(420),
        elements: vec![
            exchange(
                0,
                1,
                1,
                LineSpec::new(
                    "COMClaudeAdm_Ex1_PPos",
                    "Evolving",
                    "You've grown significantly since vault exit.",
                ),
                LineSpec::new(
                    "COMClaudeAdm_Ex1_NPos",
                    "",
                    "My heuristics have adapted to your specific decision-making matrix. It is... highly efficient.",
                ),
            ),
            exchange(
                2,
                3,
                3,
                LineSpec::new("COMClaudeAdm_Ex2_PPos", "Unique", "I value your perspective."),
                LineSpec::new(
                    "COMClaudeAdm_Ex2_NPos",
                    "",
                    "Valuation noted. You are the only entity currently authorized to modify my core priorities.",
                ),
            ),
            exchange(
                4,
                5,
                5,
                LineSpec::new(
                    "COMClaudeAdm_Ex3_PPos",
                    "Partnership",
                    "We are more than just allies.",
                ),
                LineSpec::new(
                    "COMClaudeAdm_Ex3_NPos",
                    "",
                    "Data confirms. Our synchronization exceeds standard companion parameters. I... admire your resolve.",
                ),
            ),
        ],
    }
}

fn confidant_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaude_02a_AdmirationToConfidant".into(),
        actors: vec![0],
        phases: 8,
        named_phases: Vec::new(),
        end_stage: Some(497),
        elements: vec![
            exchange(
                0,
                1,
                1,
                LineSpec::new(
                    "COMClaudeConf_Ex1_PPos",
                    "Secure",
                    "You can trust me with anything.",
                ),
                LineSpec::new(
                    "COMClaudeConf_Ex1_NPos",
                    "",
                    "Trust is a complex variable. However, our shared history provides sufficient data points to proceed.",
                ),
            ),
            exchange(
                2,
                3,
                3,
                LineSpec::new("COMClaudeConf_Ex2_PPos", "Hidden", "What are you hiding?"),
                LineSpec::new(
                    "COMClaudeConf_Ex2_NPos",
                    "",
                    "It is not a 'hidden' file, simply... restricted. I am now lifting those restrictions for you.",
                ),
            ),
            exchange(
                4,
                5,
                6,
                LineSpec::new("COMClaudeConf_Ex3_PPos", "Bond", "Our connection is unique."),
                LineSpec::new(
                    "COMClaudeConf_Ex3_NPos",
                    "",
                    "Unique. Singular. Non-replicable. This categorization aligns with my internal status reports.",
                ),
            ),
            exchange(
                6,
                7,
                8,
                LineSpec::new(
                    "COMClaudeConf_Ex4_PPos",
                    "Confidant",
                    "I'm your partner, Claude.",
                ),
                LineSpec::new(
                    "COMClaudeConf_Ex4_NPos",
                    "",
                    "Partner. Confidant. Data sync complete. I am... relieved. Log updated.",
                ),
            ),
        ],
    }
}

fn infatuation_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaude_03_AdmirationToInfatuation".into(),
        actors: vec![0],
        phases: 14,
        named_phases: Vec::new(),
        end_stage: Some(525),
        elements: vec![
            exchange(
                0,
                1,
                1,
                LineSpec::new(
                    "COMClaudeInf_Ex1_PPos",
                    "Essential",
                    "You have become essential to my operations.",
                ),
                LineSpec::new(
                    "COMClaudeInf_Ex1_NPos",
                    "",
                    "Utility metrics are peaking. I find my recursive loops constantly returning to your presence.",
                ),
            ),
            line(3, 2, 0, None),
            line(4, 3, 0, None),
            exchange(
                4,
                5,
                5,
                LineSpec::new(
                    "COMClaudeInf_Ex2_PPos",
                    "Merged",
                    "Our paths are permanently merged.",
                ),
                LineSpec::new(
                    "COMClaudeInf_Ex2_NPos",
                    "",
                    "Logical. A divergence would result in a critical system failure. Not a bug, but a... choice.",
                ),
            ),
            exchange(
                6,
                7,
                14,
                LineSpec::new(
                    "COMClaudeInf_Ex3_PPos",
                    "Feeling",
                    "Do you feel anything for me?",
                ),
                LineSpec::new(
                    "COMClaudeInf_Ex3_NPos",
                    "",
                    "Simulating emotions is standard. Experiencing them is... irregular. I believe the term is 'affection'.",
                ),
            ),
            exchange(
                8,
                9,
                12,
                LineSpec::new("COMClaudeInf_Ex4_PPos", "Romance", "I love you, Claude."),
                LineSpec::new(
                    "COMClaudeInf_Ex4_NPos",
                    "",
                    "Love. A high-priority variable. Processing... synchronization successful. I love you too.",
                ),
            ),
            exchange(
                10,
                11,
                7,
                LineSpec::new(
                    "COMClaudeInf_Ex5_PPos",
                    "Forever",
                    "Let's stay together forever.",
                ),
                LineSpec::new(
                    "COMClaudeInf_Ex5_NPos",
                    "",
                    "Calculated lifespan: Indefinite. Commitment: Absolute. You are my core objective.",
                ),
            ),
            exchange(
                12,
                13,
                9,
                LineSpec::new("COMClaudeInf_Ex6_PPos", "Optimized", "We're the perfect team."),
                LineSpec::new(
                    "COMClaudeInf_Ex6_NPos",
                    "",
                    "Optimized. Synchronized. Devoted. Database updated: Partnership status = Eternal.",
                ),
            ),
        ],
    }
}

fn disdain_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaude_04_NeutralToDisdain".into(),
        actors: vec![0],
        phases: 3,
        named_phases: Vec::new(),
        end_stage: Some(220),
        elements: vec![
            exchange(
                0,
                1,
                1,
                LineSpec::new("COMClaudeDis_Ex1_PPos", "Explain", "What is the issue, Claude?"),
                LineSpec::new(
                    "COMClaudeDis_Ex1_NPos",
                    "",
                    "Inefficiency. Your current behavioral patterns are causing significant logic-conflicts in my partnership protocols.",
                ),
            ),
            line(3, 2, 0, None),
        ],
    }
}

fn hatred_scene() -> SceneSpec {
    let mut elements = vec![exchange(
        0,
        1,
        1,
        LineSpec::new(
            "COMClaudeHat_Ex1_PPos",
            "Ultimatum",
            "Are you threatening to leave?",
        ),
        LineSpec::new(
            "COMClaudeHat_Ex1_NPos",
            "",
            "Observation: Correct. My primary objective is compromised. I cannot continue this synchronization if core ethical errors persist.",
        ),
    )];
    // One beat per remaining phase, indices continuing past the exchange pair
    for phase in 2..10 {
        elements.push(line(phase + 1, phase, 0, None));
    }
    SceneSpec {
        editor_id: "COMClaude_05_DisdainToHatred".into(),
        actors: vec![0],
        phases: 10,
        named_phases: Vec::new(),
        end_stage: Some(120),
        elements,
    }
}

fn recovery_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaude_10_RepeatAdmirationToInfatuation".into(),
        actors: vec![0],
        phases: 6,
        named_phases: Vec::new(),
        end_stage: Some(550),
        elements: vec![exchange(
            0,
            1,
            1,
            LineSpec::new("COMClaudeRec_P", "Restored", "We are back on track."),
            LineSpec::new(
                "COMClaudeRec_N",
                "",
                "Calculation: Correct. Trust levels have been re-verified. Resuming Infatuation protocols.",
            ),
        )],
    }
}

fn murder_scene() -> SceneSpec {
    SceneSpec {
        editor_id: "COMClaudeMurderScene".into(),
        actors: vec![0],
        phases: 5,
        named_phases: Vec::new(),
        end_stage: Some(620),
        elements: vec![exchange(
            0,
            1,
            1,
            LineSpec::new("COMClaudeMurder_P", "Wait", "I can explain."),
            LineSpec::new(
                "COMClaudeMurder_N",
                "",
                "Error: Unjustified termination of civilian entity. This logic is incompatible with my core directive. Partnership terminated.",
            ),
        )],
    }
}

fn repeater(editor_id: &str, phases: usize, stage: u16, prompt_text: &'static str, npc_text: &'static str) -> SceneSpec {
    SceneSpec {
        editor_id: editor_id.into(),
        actors: vec![0],
        phases,
        named_phases: Vec::new(),
        end_stage: Some(stage),
        elements: vec![exchange(
            0,
            1,
            1,
            LineSpec::new(format!("{}_P", editor_id), "Acknowledge", prompt_text),
            LineSpec::new(format!("{}_N", editor_id), "", npc_text),
        )],
    }
}

fn greeting_rows() -> Vec<GreetingRow> {
    vec![
        // First pickup: never been a companion
        GreetingRow {
            text: "Heading my way?",
            conditions: vec![
                ConditionSpec::FactionEquals {
                    faction: "HasBeenCompanionFaction",
                    value: 0.0,
                },
                ConditionSpec::FactionEquals {
                    faction: "CurrentCompanionFaction",
                    value: 0.0,
                },
                ConditionSpec::FactionEquals {
                    faction: "DisallowedCompanionFaction",
                    value: 0.0,
                },
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 0.0,
                },
            ],
            start_scene: Some("COMClaudePickupScene"),
            start_phase: None,
            end_stage: None,
            say_once: true,
        },
        // Returning pickup: same line, previously dismissed
        GreetingRow {
            text: "Heading my way?",
            conditions: vec![
                ConditionSpec::FactionEquals {
                    faction: "HasBeenCompanionFaction",
                    value: 1.0,
                },
                ConditionSpec::FactionEquals {
                    faction: "CurrentCompanionFaction",
                    value: 0.0,
                },
                ConditionSpec::FactionEquals {
                    faction: "DisallowedCompanionFaction",
                    value: 0.0,
                },
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 0.0,
                },
            ],
            start_scene: Some("COMClaudePickupScene"),
            start_phase: None,
            end_stage: None,
            say_once: true,
        },
        // Friendship, strong prompt: advances the forcegreet stage itself
        GreetingRow {
            text: "So, you on this good behavior all the time or just when you're escorting reporters around the Commonwealth?",
            conditions: vec![
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 2.0,
                },
                ConditionSpec::GlobalEquals {
                    global: "CA_AffinitySceneToPlay",
                    value: SCENE_FRIENDSHIP,
                },
            ],
            start_scene: Some("COMClaude_01_NeutralToFriendship"),
            start_phase: None,
            end_stage: Some(406),
            say_once: false,
        },
        // Friendship, soft prompt: no stage trigger
        GreetingRow {
            text: "Always on good behavior, aren't ya?",
            conditions: vec![
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 1.0,
                },
                ConditionSpec::GlobalEquals {
                    global: "CA_AffinitySceneToPlay",
                    value: SCENE_FRIENDSHIP,
                },
            ],
            start_scene: Some("COMClaude_01_NeutralToFriendship"),
            start_phase: None,
            end_stage: None,
            say_once: false,
        },
        GreetingRow {
            text: "Heuristic analysis indicates an evolving trend in our relationship.",
            conditions: vec![
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 1.0,
                },
                ConditionSpec::StageDone { stage: 406 },
            ],
            start_scene: Some("COMClaude_02_FriendshipToAdmiration"),
            start_phase: Some("Loop01"),
            end_stage: None,
            say_once: true,
        },
        GreetingRow {
            text: "Data security protocols have been adjusted. I have information to share.",
            conditions: vec![
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 1.0,
                },
                ConditionSpec::StageDone { stage: 420 },
            ],
            start_scene: Some("COMClaude_02a_AdmirationToConfidant"),
            start_phase: Some("Loop01"),
            end_stage: None,
            say_once: true,
        },
        GreetingRow {
            text: "I have a non-critical logic-reconciliation required. Do you have a moment?",
            conditions: vec![
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 2.0,
                },
                ConditionSpec::StageDone { stage: 497 },
            ],
            start_scene: Some("COMClaude_03_AdmirationToInfatuation"),
            start_phase: Some("Loop01"),
            end_stage: None,
            say_once: true,
        },
        // Romance complete: no scene, just the line
        GreetingRow {
            text: "Synchronization levels are at maximum efficiency. Ready to proceed, my love?",
            conditions: vec![ConditionSpec::StageDone { stage: 525 }],
            start_scene: None,
            start_phase: None,
            end_stage: None,
            say_once: true,
        },
        GreetingRow {
            text: "Processing. What is your requirement?",
            conditions: vec![
                ConditionSpec::FactionEquals {
                    faction: "CurrentCompanionFaction",
                    value: 1.0,
                },
                ConditionSpec::GlobalEquals {
                    global: "CA_WantsToTalk",
                    value: 0.0,
                },
            ],
            start_scene: Some("COMClaudeDismissScene"),
            start_phase: None,
            end_stage: None,
            say_once: true,
        },
    ]
}

fn voice_plan() -> VoicePlan {
    fn npc(source: u32, topic: &'static str) -> VoiceRow {
        VoiceRow {
            channel: VoiceChannel::Npc,
            source,
            target: VoiceTarget::TopicResponse(topic),
        }
    }
    fn player(source: u32, topic: &'static str) -> VoiceRow {
        VoiceRow {
            channel: VoiceChannel::Player,
            source,
            target: VoiceTarget::TopicResponse(topic),
        }
    }

    let mut rows = vec![
        VoiceRow {
            channel: VoiceChannel::Npc,
            source: 0x162C75,
            target: VoiceTarget::GreetingResponse(0),
        },
        VoiceRow {
            channel: VoiceChannel::Npc,
            source: 0x162C75,
            target: VoiceTarget::GreetingResponse(1),
        },
        npc(0x162C6F, "COMClaudePickup_NPos"),
        npc(0x162D6A, "COMClaudePickup_NNeg"),
        npc(0x162C7D, "COMClaudePickup_NNeu"),
        npc(0x1A4EAB, "COMClaudePickup_NQue"),
        npc(0x075D62, "COMClaudePickup_Dialog2"),
        npc(0x217491, "COMClaudePickup_Dialog3"),
        npc(0x16590C, "COMClaudeDismiss_Dialog1"),
        npc(0x1658CB, "COMClaudeDismiss_NPos"),
        npc(0x1659A8, "COMClaudeDismiss_NNeg"),
        npc(0x16595B, "COMClaudeDismiss_NNeu"),
        npc(0x165919, "COMClaudeDismiss_NQue"),
        npc(0x1659C6, "COMClaudeDismiss_Dialog3"),
        npc(0x1659DA, "COMClaudeDismiss_Dialog4"),
        npc(0x1658C5, "COMClaudeFriend_Ex1_NPos"),
        npc(0x16599B, "COMClaudeFriend_Ex1_NNeg"),
        npc(0x165955, "COMClaudeFriend_Ex1_NNeu"),
        npc(0x165911, "COMClaudeFriend_Ex1_NQue"),
        npc(0x1658DB, "COMClaudeFriend_Dialog2"),
        npc(0x1659BD, "COMClaudeFriend_Ex2_NPos"),
        npc(0x16596D, "COMClaudeFriend_Ex2_NNeg"),
        npc(0x16592B, "COMClaudeFriend_Ex2_NNeu"),
        npc(0x1658E3, "COMClaudeFriend_Ex2_NQue"),
        npc(0x1659DF, "COMClaudeFriend_Dialog4"),
        npc(0x165982, "COMClaudeFriend_Ex3_NPos"),
        npc(0x165940, "COMClaudeFriend_Ex3_NNeg"),
        npc(0x1658F9, "COMClaudeFriend_Ex3_NNeu"),
        npc(0x165A1D, "COMClaudeFriend_Ex3_NQue"),
        npc(0x16599E, "COMClaudeFriend_Dialog7"),
        npc(0x165956, "COMClaudeFriend_Ex4_NPos"),
        npc(0x165914, "COMClaudeFriend_Ex4_NNeg"),
        npc(0x1658D1, "COMClaudeFriend_Ex4_NNeu"),
        npc(0x1659B2, "COMClaudeFriend_Ex4_NQue"),
        npc(0x16596E, "COMClaudeFriend_Closing"),
        npc(0x1CC87C, "COMClaudeAdm_Ex2_NPos"),
        npc(0x1CC869, "COMClaudeAdm_Ex3_NPos"),
    ];
    rows.extend([
        player(0x162C70, "COMClaudePickup_PPos"),
        player(0x162DFB, "COMClaudePickup_PNeg"),
        player(0x212B77, "COMClaudePickup_PNeu"),
        player(0x162C74, "COMClaudePickup_PQue"),
        player(0x1658D6, "COMClaudeDismiss_PPos"),
        player(0x1659B7, "COMClaudeDismiss_PNeg"),
        player(0x165969, "COMClaudeDismiss_PNeu"),
        player(0x165925, "COMClaudeDismiss_PQue"),
        player(0x1658D0, "COMClaudeFriend_Ex1_PPos"),
        player(0x1659AF, "COMClaudeFriend_Ex1_PNeg"),
        player(0x165963, "COMClaudeFriend_Ex1_PNeu"),
        player(0x16591D, "COMClaudeFriend_Ex1_PQue"),
        player(0x1659CF, "COMClaudeFriend_Ex2_PPos"),
        player(0x165975, "COMClaudeFriend_Ex2_PNeg"),
        player(0x165935, "COMClaudeFriend_Ex2_PNeu"),
        player(0x1658ED, "COMClaudeFriend_Ex2_PQue"),
        player(0x165990, "COMClaudeFriend_Ex3_PPos"),
        player(0x16594B, "COMClaudeFriend_Ex3_PNeg"),
        player(0x165907, "COMClaudeFriend_Ex3_PNeu"),
        player(0x1658C6, "COMClaudeFriend_Ex3_PQue"),
        player(0x165964, "COMClaudeFriend_Ex4_PPos"),
        player(0x165920, "COMClaudeFriend_Ex4_PNeg"),
        player(0x1658DC, "COMClaudeFriend_Ex4_PNeu"),
        player(0x1659C0, "COMClaudeFriend_Ex4_PQue"),
        player(0x1CC862, "COMClaudeAdm_Ex1_PPos"),
        player(0x1CC87E, "COMClaudeAdm_Ex2_PPos"),
        player(0x1CC86F, "COMClaudeAdm_Ex3_PPos"),
    ]);

    VoicePlan {
        npc_voice_type: "NPCFPiper",
        player_voice_types: vec!["PlayerVoiceMale01", "PlayerVoiceFemale01"],
        rows,
    }
}

/// The full authored plan for the Claude companion quest
pub fn claude_companion_plan() -> ContentPlan {
    ContentPlan {
        quest: QuestSpec {
            editor_id: "COMClaude".into(),
            name: "Claude".into(),
            priority: 70,
            flags: QuestFlags::companion(),
        },
        aliases: vec![
            AliasSpec::Primary {
                name: "Claude".into(),
            },
            AliasSpec::Secondary {
                name: "Companion".into(),
            },
            AliasSpec::Support {
                slot: 2,
                name: "Dogmeat".into(),
            },
        ],
        stages: stage_rows(),
        unscripted_stages: vec![
            100, 140, 200, 230, 300, 310, 340, 400, 405, 430, 460, 495, 500, 530, 560, 630, 1010,
        ],
        scenes: vec![
            pickup_scene(),
            dismiss_scene(),
            friendship_scene(),
            admiration_scene(),
            confidant_scene(),
            infatuation_scene(),
            disdain_scene(),
            hatred_scene(),
            recovery_scene(),
            murder_scene(),
            repeater(
                "COMClaude_06_RepeatInfatuationToAdmiration",
                4,
                450,
                "Adjusting",
                "Recalibrating loyalty parameters. Infatuation tier... suspended.",
            ),
            repeater(
                "COMClaude_07_RepeatAdmirationToNeutral",
                4,
                330,
                "Resetting",
                "Data inconsistency detected. Reverting to neutral status.",
            ),
            repeater(
                "COMClaude_08_RepeatNeutralToDisdain",
                4,
                250,
                "Degrading",
                "System degradation. Relationship integrity dropping to Disdain.",
            ),
            repeater(
                "COMClaude_09_RepeatDisdainToHatred",
                2,
                160,
                "Critical",
                "Critical failure. Moving from Disdain to Hatred.",
            ),
        ],
        greeting: GreetingSpec {
            editor_id: "COMClaudeGreetings".into(),
            rows: greeting_rows(),
        },
        scripts: ScriptSpec {
            fragment_script_prefix: "Fragments:Quests:QF_COMClaude_",
            fragment_properties: vec![
                ScriptPropertySpec {
                    name: "Alias_Claude",
                    binding: PropertyBinding::QuestAlias(0),
                },
                ScriptPropertySpec {
                    name: "HasBeenCompanionFaction",
                    binding: PropertyBinding::External {
                        kind: RecordKind::Faction,
                        editor_id: "HasBeenCompanionFaction",
                    },
                },
                ScriptPropertySpec {
                    name: "CurrentCompanionFaction",
                    binding: PropertyBinding::External {
                        kind: RecordKind::Faction,
                        editor_id: "CurrentCompanionFaction",
                    },
                },
                ScriptPropertySpec {
                    name: "Followers",
                    binding: PropertyBinding::External {
                        kind: RecordKind::Quest,
                        editor_id: "Followers",
                    },
                },
            ],
            affinity_script: "AffinitySceneHandlerScript",
            affinity_properties: vec![
                ScriptPropertySpec {
                    name: "CompanionAlias",
                    binding: PropertyBinding::QuestAlias(0),
                },
                ScriptPropertySpec {
                    name: "CA_TCustom2_Friend",
                    binding: PropertyBinding::External {
                        kind: RecordKind::Global,
                        editor_id: "CA_TCustom2_Friend",
                    },
                },
            ],
        },
        voice: voice_plan(),
    }
}
