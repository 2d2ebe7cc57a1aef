//! Closed vocabulary mapping surface word forms to synonym groups.
//!
//! Synonyms share a numeric group id ("get"/"take"/"grab" are one verb group),
//! so scene logic matches on ids instead of spellings. Group 0 is reserved for
//! filler words (articles, prepositions) that the parser discards. Surface
//! forms may span several words ("case file", "put on"); the parser matches
//! the longest form first.
//!
//! Later insertions overwrite earlier ones, so a form listed both as a verb
//! and a noun resolves to whichever entry comes last in the table ("radio" is
//! the noun, not the call-verb).

use std::collections::HashMap;

/// Group id reserved for discarded filler words.
pub const FILLER: u16 = 0;

/// Verb group ids of the standard vocabulary.
pub mod groups {
    pub const LOOK: u16 = 1;
    pub const GET: u16 = 2;
    pub const USE: u16 = 3;
    pub const OPEN: u16 = 4;
    pub const CLOSE: u16 = 5;
    pub const TALK: u16 = 6;
    pub const GO: u16 = 7;
    pub const GIVE: u16 = 8;
    pub const PUSH: u16 = 9;
    pub const PULL: u16 = 10;
    pub const WEAR: u16 = 11;
    pub const DROP: u16 = 12;
    pub const DRIVE: u16 = 13;
    pub const ARREST: u16 = 14;
    pub const CALL: u16 = 15;
    pub const WRITE: u16 = 16;
    pub const LOAD: u16 = 17;
    pub const DRAW: u16 = 18;
    pub const HOLSTER: u16 = 19;
    pub const SIT: u16 = 20;
    pub const STAND: u16 = 21;
    pub const TURN: u16 = 22;
    pub const SHOOT: u16 = 23;
    pub const FOLLOW: u16 = 24;
    pub const WAIT: u16 = 25;
    pub const SAVE: u16 = 26;
    pub const INVENTORY: u16 = 27;
    pub const HELP: u16 = 28;
}

lazy_static! {
    /// The built-in word list. Order matters: duplicates resolve to the last
    /// entry.
    static ref STANDARD_WORDS: Vec<(&'static str, u16)> = vec![
        // Verbs
        ("look", 1), ("examine", 1), ("inspect", 1), ("check", 1), ("search", 1), ("read", 1),
        ("get", 2), ("take", 2), ("grab", 2), ("pick", 2), ("collect", 2),
        ("use", 3), ("apply", 3),
        ("open", 4), ("unlock", 4),
        ("close", 5), ("shut", 5),
        ("talk", 6), ("speak", 6), ("ask", 6), ("say", 6), ("tell", 6),
        ("walk", 7), ("go", 7), ("move", 7), ("enter", 7),
        ("give", 8), ("show", 8), ("hand", 8),
        ("push", 9), ("press", 9),
        ("pull", 10),
        ("wear", 11), ("put on", 11), ("equip", 11), ("change", 11), ("dress", 11),
        ("drop", 12), ("put", 12),
        ("drive", 13), ("start", 13),
        ("arrest", 14), ("cuff", 14), ("handcuff", 14),
        ("call", 15), ("radio", 15), ("dial", 15),
        ("write", 16), ("note", 16),
        ("load", 17),
        ("draw", 18),
        ("holster", 19),
        ("sit", 20), ("stand", 21),
        ("turn", 22), ("switch", 22),
        ("shoot", 23), ("fire", 23),
        ("follow", 24),
        ("wait", 25), ("hide", 25),
        ("save", 26),
        ("inventory", 27),
        ("help", 28),

        // Nouns - station
        ("locker", 50), ("cabinet", 50),
        ("gun", 51), ("revolver", 51), ("pistol", 51), ("weapon", 51), ("firearm", 51),
        ("badge", 52),
        ("radio", 53),
        ("notebook", 54), ("notes", 54), ("notepad", 54),
        ("key", 55), ("keys", 55),
        ("uniform", 56), ("clothes", 56),
        ("desk", 57),
        ("computer", 58), ("terminal", 58),
        ("phone", 59), ("telephone", 59),
        ("door", 60),
        ("memo", 61), ("paper", 61), ("report", 61),
        ("car", 62), ("vehicle", 62), ("patrol", 62), ("cruiser", 62),
        ("nightstick", 63), ("baton", 63),
        ("handcuffs", 64), ("cuffs", 64),
        ("flashlight", 65), ("torch", 65),
        ("evidence", 66), ("clue", 66),
        ("file", 67), ("folder", 67), ("case file", 67),
        ("coffee", 68), ("mug", 68),
        ("shower", 69),
        ("towel", 70),
        ("briefcase", 71),
        ("ticket", 72), ("citation", 72),
        ("license", 73),
        ("wallet", 74),
        ("map", 75),
        ("photo", 76), ("photograph", 76), ("picture", 76),
        ("fingerprint", 77), ("prints", 77),
        ("warrant", 78),
        ("suspect", 79),
        ("witness", 80),
        ("victim", 81),
        ("body", 82),
        ("trash", 83), ("garbage", 83), ("can", 83),
        ("bench", 84),
        ("receipt", 85),
        ("note", 86), ("ransom", 86),
        ("van", 87),
        ("rope", 88), ("ropes", 88),
        ("chair", 89),

        // Nouns - locations
        ("north", 90), ("south", 91), ("east", 92), ("west", 93),
        ("inside", 94), ("outside", 95),
        ("upstairs", 96), ("downstairs", 97),
        ("station", 100), ("precinct", 100),
        ("office", 101),
        ("locker room", 102),
        ("briefing", 103), ("briefing room", 103),
        ("parking", 104), ("lot", 104), ("garage", 104),
        ("jail", 105), ("cell", 105),
        ("lab", 106), ("forensics", 106),
        ("street", 107), ("road", 107),
        ("diner", 108), ("cafe", 108), ("restaurant", 108),
        ("bar", 109), ("pub", 109),
        ("park", 110),
        ("courthouse", 111),
        ("apartment", 112), ("building", 112),
        ("warehouse", 113), ("docks", 113),
        ("alley", 114),
        ("shop", 115), ("store", 115),
        ("hotel", 116),
        ("room", 117),

        // People
        ("man", 120), ("guy", 120), ("person", 120),
        ("woman", 121), ("lady", 121),
        ("captain", 122), ("chief", 122), ("boss", 122),
        ("partner", 123),
        ("bartender", 124), ("barkeeper", 124),
        ("clerk", 125),
        ("judge", 126),
        ("lawyer", 127),
        ("detective", 128),
        ("officer", 129),
        ("criminal", 130), ("crook", 130), ("thief", 130),
        ("back", 132), ("here", 132),

        // Filler (group 0)
        ("the", 0), ("a", 0), ("an", 0), ("to", 0), ("at", 0),
        ("in", 0), ("on", 0), ("with", 0), ("my", 0), ("of", 0),
        ("up", 0), ("around", 0), ("for", 0), ("from", 0), ("about", 0),
        ("into", 0), ("it", 0), ("this", 0), ("that", 0), ("is", 0),
        ("please", 0), ("just", 0), ("then", 0), ("some", 0),
    ];
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, u16>,
    max_phrase_len: usize,
}

impl Dictionary {
    /// An empty dictionary; content supplies its own vocabulary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
            max_phrase_len: 1,
        }
    }

    /// The built-in vocabulary.
    pub fn standard() -> Dictionary {
        let mut dict = Dictionary::new();
        for &(form, group) in STANDARD_WORDS.iter() {
            dict.add_word(form, group);
        }
        dict
    }

    /// Insert or overwrite a surface form. Multi-word forms raise the phrase
    /// window the parser scans with.
    pub fn add_word(&mut self, form: &str, group: u16) {
        let words = form.split_whitespace().count();
        self.max_phrase_len = self.max_phrase_len.max(words.max(1));
        self.words.insert(form.to_string(), group);
    }

    pub fn lookup(&self, form: &str) -> Option<u16> {
        self.words.get(form).copied()
    }

    /// Longest surface form in the vocabulary, in words.
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
