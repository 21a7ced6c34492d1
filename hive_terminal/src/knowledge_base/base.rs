//! Knowledge Base - the ordered set of compound rules and keyword entries.

use hive_portal::Page;
use serde::{Deserialize, Serialize};

use super::{CompoundRule, KnowledgeEntry};
use crate::message::{Action, Link};

/// Static answers, checked in declaration order.
///
/// Order matters twice: the first matching compound rule wins, and among
/// keyword entries a later entry only wins with a strictly higher score.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeBase {
    rules: Vec<CompoundRule>,
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Create a new empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// The club's built-in answers.
    pub fn builtin() -> Self {
        let mut kb = Self::new();

        kb.add_rule(CompoundRule::new(
            ["register", "event"],
            "To register, visit the 'Events' page, click on any 'Upcoming' event card, and fill out the registration form. It's fully automated!",
        ));
        kb.add_rule(CompoundRule::new(
            ["download", "photo"],
            "You can download photos from the 'Gallery'. Select the 'Photos' tab, switch to 'Selection Mode', pick your images, and click Download.",
        ));

        kb.add_entry(KnowledgeEntry::new(
            ["hi", "hello", "hey", "greetings", "namaste", "hola", "start"],
            "Namaste! Welcome to BEE-IT HIVE. Feel free to ask about our events, team, or mission.",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["bye", "goodbye", "see you", "end", "close"],
            "Goodbye! Tech Minds, Future Finds. See you soon!",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["president", "nirajan", "dhakal", "leader", "head"],
            "Nirajan Dhakal is the President of BEE-IT HIVE. He leads the executive committee and oversees all club operations.",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["coordinator", "amrit", "poudel"],
            "Amrit Poudel is our Coordinator. He manages internal affairs and ensures smooth execution of our programs.",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["saroj", "giri", "faculty", "advisor", "teacher", "sir"],
            "Er. Saroj Giri is our Faculty Advisor. He provides academic guidance and connects us with industry standards.",
        ));
        kb.add_entry(
            KnowledgeEntry::new(
                ["team", "committee", "members", "board", "executive"],
                "Our team consists of passionate BIT students. You can see the full hierarchy, from the President to General Members, in the 'Team' section.",
            )
            .with_action(Action::new("Meet Team", Page::Team)),
        );
        kb.add_entry(
            KnowledgeEntry::new(
                ["event", "hackathon", "workshop", "summit", "program", "schedule", "calendar"],
                "We host Hackathons, Workshops, and Socials! Check the 'Events' page for the 'Global Innovation Summit 2025' and 'BIT Hackathon 3.0'.",
            )
            .with_action(Action::new("View Events", Page::Events)),
        );
        kb.add_entry(KnowledgeEntry::new(
            ["join", "membership", "member", "sign up", "register", "application"],
            "Membership is open to all BIT students at Gandaki University! Go to the 'Contact' page and select 'Membership' in the inquiry form to apply.",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["location", "where", "address", "map", "place", "office"],
            "We are located at Gandaki University, Gyankunja, Pokhara-32. There's a map in the footer if you need directions!",
        ));
        kb.add_entry(
            KnowledgeEntry::new(
                ["contact", "email", "phone", "message", "reach", "call"],
                "You can email us at bee-it.hive@gandakiuniversity.edu.np. For quick inquiries, use the Assistant or the Contact form.",
            )
            .with_action(Action::new("Contact Us", Page::Contact)),
        );
        kb.add_entry(
            KnowledgeEntry::new(
                ["gallery", "photo", "picture", "video", "cinematic", "memory", "images"],
                "Our 'Gallery' features high-res photos and event cinematics. You can even batch download images for your collection.",
            )
            .with_action(Action::new("Open Gallery", Page::Gallery)),
        );
        kb.add_entry(KnowledgeEntry::new(
            ["about", "mission", "vision", "goal", "objective"],
            "BEE-IT HIVE is the student-led IT ecosystem of Gandaki University. Our mission is to promote technical education through hands-on collaboration.",
        ));
        kb.add_entry(KnowledgeEntry::new(
            ["website", "developer", "created", "made", "tech stack"],
            "This portal is built with React, Tailwind CSS, and TypeScript. It was developed by the BEE-IT Technical Committee.",
        ));
        kb.add_entry(
            KnowledgeEntry::new(
                ["socials", "facebook", "instagram", "github", "follow"],
                "Follow the Hive for announcements, photos and code:",
            )
            .with_links([
                Link::brand("Facebook", "https://facebook.com/beeit.hive", "facebook"),
                Link::brand("Instagram", "https://instagram.com/beeit.hive", "instagram"),
                Link::brand("GitHub", "https://github.com/beeit-hive", "github"),
            ]),
        );

        kb
    }

    /// Append a compound rule after the existing ones.
    pub fn add_rule(&mut self, rule: CompoundRule) {
        self.rules.push(rule);
    }

    /// Append a keyword entry after the existing ones.
    pub fn add_entry(&mut self, entry: KnowledgeEntry) {
        self.entries.push(entry);
    }

    pub fn rules(&self) -> &[CompoundRule] {
        &self.rules
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// First compound rule matching a lowercased utterance.
    pub fn matching_rule(&self, utterance: &str) -> Option<&CompoundRule> {
        self.rules.iter().find(|rule| rule.matches(utterance))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contents() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.rules().len(), 2);
        assert_eq!(kb.entry_count(), 14);
        assert!(kb.entries()[0].keywords.contains(&"hello".to_string()));
    }

    #[test]
    fn test_rule_order() {
        let kb = KnowledgeBase::builtin();
        let rule = kb.matching_rule("can i register for the event").unwrap();
        assert!(rule.response.starts_with("To register"));
        assert!(kb.matching_rule("register me").is_none());
    }

    #[test]
    fn test_social_entry_has_brand_links() {
        let kb = KnowledgeBase::builtin();
        let social = kb
            .entries()
            .iter()
            .find(|e| e.keywords.contains(&"instagram".to_string()))
            .unwrap();

        assert_eq!(social.links.len(), 3);
        assert!(social.links.iter().all(|l| l.is_brand));
    }

    #[test]
    fn test_empty_knowledge_base() {
        let kb = KnowledgeBase::new();
        assert!(kb.matching_rule("register event").is_none());
        assert_eq!(kb.entry_count(), 0);
    }
}
