//! Mission pages and their station content
//!
//! The activity is a fixed sequence of nine pages. Five of them are stations:
//! each owns a slot context with its default glyph slots, a few report
//! questions, and a timed body challenge.

use crate::domain::{ContextKey, Slot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    /// Agent name entry
    Cover,
    /// Fingerprint verification
    Briefing,
    /// How glyph parts assemble
    Training,
    Market,
    HotSpring,
    Statue,
    LaserMaze,
    Garden,
    /// Mission report
    Debrief,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Cover,
        Page::Briefing,
        Page::Training,
        Page::Market,
        Page::HotSpring,
        Page::Statue,
        Page::LaserMaze,
        Page::Garden,
        Page::Debrief,
    ];

    pub const FIRST: Page = Page::Cover;
    pub const LAST: Page = Page::Debrief;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Page> {
        Self::ALL.get(index).copied()
    }

    pub fn station(self) -> Option<&'static Station> {
        STATIONS.iter().find(|station| station.page == self)
    }
}

pub struct DefaultSlot {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn slot(label: &'static str, description: &'static str) -> DefaultSlot {
    DefaultSlot {
        id: label,
        label,
        description,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    /// One of a fixed set of text values
    Choice(&'static [&'static str]),
    /// 1 to 5 stars
    Rating,
    Flag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub kind: QuestionKind,
}

const fn question(key: &'static str, kind: QuestionKind) -> Question {
    Question { key, kind }
}

pub struct Station {
    pub page: Page,
    pub context: &'static str,
    pub defaults: &'static [DefaultSlot],
    pub questions: &'static [Question],
    pub challenge_secs: u32,
}

impl Station {
    pub fn context_key(&self) -> ContextKey {
        ContextKey::new(self.context)
    }

    /// Fresh default layout for this station
    pub fn default_layout(&self) -> Vec<Slot> {
        self.defaults
            .iter()
            .map(|d| Slot::default_slot(d.id, d.label, d.description))
            .collect()
    }

    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }
}

pub static STATIONS: [Station; 5] = [
    Station {
        page: Page::Market,
        context: "page3",
        defaults: &[
            slot("口", "嘴巴/入口"),
            slot("火", "热能/灯光"),
            slot("扌", "动作/抓取"),
        ],
        questions: &[
            question("page3_fed", QuestionKind::Choice(&["full", "need"])),
            question("page3_most", QuestionKind::Text),
        ],
        challenge_secs: 10,
    },
    Station {
        page: Page::HotSpring,
        context: "page4",
        defaults: &[
            slot("木", "结构/楼梯"),
            slot("土", "防御/墙壁"),
            slot("氵", "温泉/流体"),
        ],
        questions: &[
            question("page4_stars", QuestionKind::Rating),
            question("page4_bath", QuestionKind::Flag),
        ],
        challenge_secs: 40,
    },
    Station {
        page: Page::Statue,
        context: "page5",
        defaults: &[
            slot("亻", "人类/英雄"),
            slot("讠", "语言/信号"),
            slot("门", "通道/空间"),
        ],
        questions: &[
            question("page5_draw", QuestionKind::Text),
            question("page5_food", QuestionKind::Choice(&["yes", "no"])),
        ],
        challenge_secs: 5,
    },
    Station {
        page: Page::LaserMaze,
        context: "page6",
        defaults: &[
            slot("宀", "护盾/屋顶"),
            DefaultSlot {
                id: "安全门",
                label: "门",
                description: "闸门/安全",
            },
            DefaultSlot {
                id: "Free",
                label: "★",
                description: "自由搜集",
            },
        ],
        questions: &[
            question("page6_room", QuestionKind::Text),
            question("page6_stars", QuestionKind::Rating),
            question("page6_plan", QuestionKind::Choice(&["early", "sleep"])),
        ],
        challenge_secs: 20,
    },
    Station {
        page: Page::Garden,
        context: "page7",
        defaults: &[
            slot("艹", "植物/花草"),
            DefaultSlot {
                id: "森",
                label: "木",
                description: "骨架/树林",
            },
            slot("山", "地形/岩石"),
        ],
        questions: &[
            question("page7_leaf", QuestionKind::Choice(&["smooth", "rough"])),
            question("page7_cactus", QuestionKind::Text),
        ],
        challenge_secs: 30,
    },
];

/// Find the station owning a slot context
pub fn station_for(context: &ContextKey) -> Option<&'static Station> {
    STATIONS.iter().find(|s| s.context == context.as_str())
}

/// Find any report question by key
pub fn find_question(key: &str) -> Option<&'static Question> {
    STATIONS.iter().find_map(|s| s.question(key))
}
