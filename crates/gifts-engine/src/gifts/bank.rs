use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of items in the core questionnaire.
pub const CORE_QUESTION_COUNT: usize = 50;
/// Items owned by each gift inside the core questionnaire.
pub const ITEMS_PER_GIFT: usize = 5;
/// Discriminative follow-up items asked per candidate gift during a tie-break.
pub const TIEBREAK_ITEMS_PER_GIFT: usize = 3;

/// Lowest and highest accepted Likert answer.
pub const LIKERT_MIN: i32 = 1;
pub const LIKERT_MAX: i32 = 5;

/// The ten scored gift categories, in declaration order.
///
/// Declaration order doubles as the deterministic tie order when two gifts end up with exactly
/// the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gift {
    Teaching,
    Exhortation,
    Evangelism,
    Mercy,
    Helps,
    Giving,
    Leadership,
    Wisdom,
    Discernment,
    Intercession,
}

impl Gift {
    pub const ALL: [Gift; 10] = [
        Gift::Teaching,
        Gift::Exhortation,
        Gift::Evangelism,
        Gift::Mercy,
        Gift::Helps,
        Gift::Giving,
        Gift::Leadership,
        Gift::Wisdom,
        Gift::Discernment,
        Gift::Intercession,
    ];

    /// Zero-based declaration position.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Gift::Teaching => "Teaching",
            Gift::Exhortation => "Exhortation",
            Gift::Evangelism => "Evangelism",
            Gift::Mercy => "Mercy",
            Gift::Helps => "Helps",
            Gift::Giving => "Giving",
            Gift::Leadership => "Leadership",
            Gift::Wisdom => "Wisdom",
            Gift::Discernment => "Discernment",
            Gift::Intercession => "Intercession",
        }
    }

    /// First core question index owned by this gift.
    pub fn first_item(self) -> usize {
        self.position() * ITEMS_PER_GIFT
    }
}

impl fmt::Display for Gift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-type of a core item, used to weight its contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// What the respondent feels compelled toward.
    Burden,
    /// What the respondent actually does.
    Behavior,
    /// Outcomes the respondent perceives in others.
    Fruit,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Burden => "burden",
            ItemKind::Behavior => "behavior",
            ItemKind::Fruit => "fruit",
        }
    }
}

/// Sub-type layout repeated for every gift block. Positional, never inferred from text.
const GIFT_BLOCK_LAYOUT: [ItemKind; ITEMS_PER_GIFT] = [
    ItemKind::Burden,
    ItemKind::Burden,
    ItemKind::Behavior,
    ItemKind::Behavior,
    ItemKind::Fruit,
];

/// A single core questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionItem {
    pub index: usize,
    pub gift: Gift,
    pub kind: ItemKind,
    pub text: &'static str,
}

/// A discriminative follow-up item used only during a tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TiebreakItem {
    pub gift: Gift,
    pub position: usize,
    pub text: &'static str,
}

/// Look up a core item by its zero-based index.
pub fn question(index: usize) -> Option<QuestionItem> {
    let text = *CORE_TEXT.get(index)?;
    Some(QuestionItem {
        index,
        gift: Gift::ALL[index / ITEMS_PER_GIFT],
        kind: GIFT_BLOCK_LAYOUT[index % ITEMS_PER_GIFT],
        text,
    })
}

/// The full core questionnaire in presentation order.
pub fn question_bank() -> impl Iterator<Item = QuestionItem> {
    (0..CORE_QUESTION_COUNT).filter_map(question)
}

/// The five core items owned by `gift`.
pub fn items_for(gift: Gift) -> impl Iterator<Item = QuestionItem> {
    let start = gift.first_item();
    (start..start + ITEMS_PER_GIFT).filter_map(question)
}

/// The three tie-break items for `gift`.
pub fn tiebreak_items(gift: Gift) -> impl Iterator<Item = TiebreakItem> {
    TIEBREAK_TEXT[gift.position()]
        .iter()
        .enumerate()
        .map(move |(position, text)| TiebreakItem {
            gift,
            position,
            text: *text,
        })
}

static CORE_TEXT: [&str; CORE_QUESTION_COUNT] = [
    // Teaching
    "I feel compelled to clarify Scripture when others misunderstand it.",
    "I am dissatisfied when biblical teaching lacks depth or accuracy.",
    "I naturally organize biblical ideas into clear explanations.",
    "I regularly study Scripture beyond what is required of me.",
    "People often tell me they understand the Bible better after I explain it.",
    // Exhortation
    "I feel driven to help people take their next step of obedience.",
    "I am burdened when believers remain stagnant in their growth.",
    "I naturally motivate others toward spiritual action.",
    "I often speak words that help people regain confidence and direction.",
    "People frequently act on their faith after conversations with me.",
    // Evangelism
    "I feel urgency when I am around people who do not know Christ.",
    "I think often about how to explain the gospel clearly to others.",
    "I initiate faith conversations outside church settings.",
    "I willingly share Christ even when it feels uncomfortable.",
    "People have taken meaningful steps toward Christ through my influence.",
    // Mercy
    "I feel deep compassion when others are suffering emotionally or physically.",
    "I am troubled when people feel unseen or forgotten.",
    "I naturally move toward people in pain rather than away from them.",
    "I willingly invest time in helping people recover from hardship.",
    "People often experience comfort or healing through my care.",
    // Helps
    "I feel responsible to support ministry needs in practical ways.",
    "I am concerned when important tasks are neglected.",
    "I consistently follow through on responsibilities others depend on.",
    "I quietly step in when something needs to be done.",
    "My support enables others to minister more effectively.",
    // Giving
    "I feel joy when I can resource God's work financially or materially.",
    "I am burdened when meaningful ministry lacks funding.",
    "I give strategically and intentionally rather than impulsively.",
    "I am willing to sacrifice comfort to support kingdom work.",
    "My generosity has significantly strengthened ministries or individuals.",
    // Leadership
    "I feel responsible to bring order when things lack direction.",
    "I am concerned when vision and structure are unclear.",
    "I naturally organize people and processes to accomplish goals.",
    "I take initiative to coordinate efforts toward shared outcomes.",
    "When I lead or organize, effectiveness noticeably increases.",
    // Wisdom
    "I feel drawn to help people apply biblical truth to real-life decisions.",
    "I am troubled when people make avoidable mistakes.",
    "I often see practical solutions others overlook.",
    "I help others weigh consequences before making decisions.",
    "My counsel has helped others make sound and balanced choices.",
    // Discernment
    "I feel compelled to evaluate teaching or situations carefully.",
    "I am unsettled when something appears spiritually inconsistent.",
    "I can identify error or unhealthy influence quickly.",
    "I test ideas against Scripture before accepting them.",
    "My discernment has helped protect others from deception or harm.",
    // Intercession
    "I feel a strong and ongoing burden to pray for people or situations.",
    "I am concerned when prayer is neglected.",
    "I consistently spend extended time in focused prayer.",
    "I return repeatedly to prayer about specific needs.",
    "My prayers have resulted in visible spiritual breakthrough or change.",
];

static TIEBREAK_TEXT: [[&str; TIEBREAK_ITEMS_PER_GIFT]; 10] = [
    [
        "I would rather teach truth thoroughly than motivate people emotionally.",
        "I feel uneasy when biblical teaching sacrifices accuracy for inspiration.",
        "I prioritize understanding Scripture correctly over quick spiritual results.",
    ],
    [
        "I am more focused on helping people act than helping them analyze.",
        "I prefer urging people forward over explaining concepts in detail.",
        "I measure spiritual success by visible obedience and growth.",
    ],
    [
        "I feel more energized around unbelievers than in long-term discipleship settings.",
        "I am comfortable redirecting conversations toward Christ quickly.",
        "I feel spiritually restless if I am not reaching new people.",
    ],
    [
        "I am more drawn to healing wounded people than building new initiatives.",
        "I value emotional restoration over strategic advancement.",
        "I prefer relational depth over large public influence.",
    ],
    [
        "I prefer supporting a vision rather than defining it.",
        "I find satisfaction in execution more than direction-setting.",
        "I am comfortable staying behind the scenes long-term.",
    ],
    [
        "I strategically evaluate where resources will produce maximum impact.",
        "I often think in terms of multiplying influence through provision.",
        "I am willing to reduce personal lifestyle to increase kingdom impact.",
    ],
    [
        "I naturally assume responsibility when a group lacks direction.",
        "I feel compelled to define structure rather than adapt to it.",
        "I am comfortable making decisions that affect many people.",
    ],
    [
        "I am more drawn to advising others than leading them directly.",
        "I often see consequences before others recognize them.",
        "I prefer solving complex problems over managing people.",
    ],
    [
        "I instinctively question motives before accepting appearances.",
        "I feel tension when truth is diluted, even subtly.",
        "I would rather slow momentum than allow spiritual compromise.",
    ],
    [
        "I would rather pray about a situation than immediately act on it.",
        "I feel sustained burden for specific needs over long periods.",
        "I sense breakthrough often comes through persistent prayer.",
    ],
];
