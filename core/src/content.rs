use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Static content for all four games, supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSet {
    pub crossword: CrosswordPuzzle,
    pub pairs: Vec<Pair>,
    pub practices: Vec<DraggableItem>,
    pub dilemmas: Vec<DilemmaStep>,
}

impl Default for PuzzleSet {
    fn default() -> Self {
        Self {
            crossword: legal_crossword(),
            pairs: legal_pairs(),
            practices: legal_practices(),
            dilemmas: legal_dilemmas(),
        }
    }
}

fn legal_crossword() -> CrosswordPuzzle {
    use Direction::*;

    CrosswordPuzzle {
        size: (8, 8),
        clues: vec![
            Clue::new(1, Across, "A contract for renting property", "LEASE", (0, 0)),
            Clue::new(4, Across, "Official account of something", "RECORD", (4, 2)),
            Clue::new(5, Across, "A legal document transferring property ownership", "DEED", (6, 1)),
            Clue::new(2, Down, "A legal professional", "ATTORNEY", (0, 2)),
            Clue::new(3, Down, "A formal written agreement", "CONTRACT", (0, 6)),
            Clue::new(6, Down, "An official order or decision", "DECREE", (2, 0)),
        ],
    }
}

fn legal_pairs() -> Vec<Pair> {
    [
        ("TORT", "A wrongful act causing civil liability."),
        ("DEED", "A legal document that transfers property ownership."),
        ("LIEN", "A legal claim on property as security for a debt."),
        ("LEASE", "A contract to rent property."),
        ("LOAN", "A sum of money lent at interest."),
        ("AGENT", "A person who acts on behalf of another."),
        ("CONTRACT", "A legally binding agreement between parties."),
        ("ESTATE", "A person's total property, assets, and liabilities."),
    ]
    .into_iter()
    .zip(0..)
    .map(|((term, definition), id)| Pair::new(id, term, definition))
    .collect()
}

fn legal_practices() -> Vec<DraggableItem> {
    use Zone::*;

    vec![
        DraggableItem::new(1, "Read the fine print", "🔍", Safe),
        DraggableItem::new(2, "Pay without a receipt", "💸", Risky),
        DraggableItem::new(3, "Sign a contract blank", "✍️", Risky),
        DraggableItem::new(4, "Get an agreement in writing", "📝", Safe),
        DraggableItem::new(5, "Take photos of property damage", "📸", Safe),
        DraggableItem::new(6, "Ignore late payment notices", "🔔", Risky),
    ]
}

/// Three options per step; `correct` is the index of the right one.
fn dilemma(situation: &str, options: [(&str, &str); 3], correct: usize) -> DilemmaStep {
    DilemmaStep {
        situation: situation.into(),
        options: options
            .into_iter()
            .enumerate()
            .map(|(index, (text, consequence))| {
                DilemmaOption::new(text, consequence, index == correct)
            })
            .collect(),
    }
}

fn legal_dilemmas() -> Vec<DilemmaStep> {
    vec![
        dilemma(
            "Your landlord suddenly raises your rent by 50% with no prior notice. What's your first step?",
            [
                (
                    "Pay it to avoid conflict.",
                    "While you avoid conflict, you may be giving up your legal rights. Many jurisdictions have laws about how and when rent can be increased.",
                ),
                (
                    "Check your local tenant laws and lease agreement.",
                    "Correct! 🎉 This is the best first step. Most places have rules about rent control and require written notice.",
                ),
                (
                    "Refuse to pay and move out immediately.",
                    "This can lead to a messy legal battle. It's better to know your rights before taking drastic action.",
                ),
            ],
            1,
        ),
        dilemma(
            "You bought a new appliance, but it broke within a week. The store refuses to replace it. What's your best option?",
            [
                (
                    "Accept the store's decision.",
                    "You might be giving up your right to a functioning product. Consumer protection laws exist for a reason!",
                ),
                (
                    "Research your consumer protection rights and demand a replacement or refund.",
                    "Correct! 🎉 Consumer protection laws often grant you the right to a refund or replacement for faulty goods.",
                ),
                (
                    "Threaten to sue the store immediately.",
                    "Threatening legal action is often a last resort. It's better to start by asserting your consumer rights first.",
                ),
            ],
            1,
        ),
        dilemma(
            "Your boss asks you to work overtime without pay, saying it's 'just a part of the job.' What should you do?",
            [
                (
                    "Work the extra hours to show dedication.",
                    "Working for free can violate labor laws. Many jobs are legally required to pay for all hours worked.",
                ),
                (
                    "Secretly record a conversation with your boss.",
                    "While this may provide evidence, some states have laws about recording conversations without consent. It's a risky move.",
                ),
                (
                    "Politely ask to see the company's overtime policy and your employment contract.",
                    "Correct! 🎉 This is a professional and effective way to understand your rights regarding overtime pay.",
                ),
            ],
            2,
        ),
        dilemma(
            "You've been offered a scholarship that requires you to maintain a 3.5 GPA. The agreement mentions a penalty for not meeting the requirement. What should you do before signing?",
            [
                (
                    "Sign it immediately, it's a great opportunity.",
                    "Signing without understanding the terms could lead to unexpected debt or lost benefits.",
                ),
                (
                    "Look for the specific clause about the GPA requirement and the penalty for not meeting it.",
                    "Correct! 🎉 Understanding the 'fine print' is crucial. The terms dictate what happens if you can't maintain the GPA.",
                ),
                (
                    "Assume the penalty is small and not worth worrying about.",
                    "Never assume with legal documents. The penalty could be repaying the full scholarship amount.",
                ),
            ],
            1,
        ),
        dilemma(
            "You received a new credit card agreement. You notice the introductory APR is 0%, but the regular APR is very high. What's the most important thing to understand?",
            [
                (
                    "Focus on the rewards program to get the most cash back.",
                    "While rewards are nice, they won't help if the interest rates are too high. High interest can quickly negate any rewards you earn.",
                ),
                (
                    "Find out when the 0% introductory rate expires and what the standard APR will be afterward.",
                    "Correct! 🎉 The terms and conditions will tell you exactly when the promotional rate ends and the higher rate kicks in. This is a crucial detail for managing your debt.",
                ),
                (
                    "Trust that the bank will send you a reminder before the interest rate changes.",
                    "Banks have no obligation to remind you. It's your responsibility to know the terms of the agreement.",
                ),
            ],
            1,
        ),
        dilemma(
            "Your new employer asks you to sign an NDA (Non-Disclosure Agreement). What should you check before you sign it?",
            [
                (
                    "Sign it, because NDAs are standard and you don't have a choice.",
                    "While NDAs are common, you should never sign a document without understanding what information is being protected and for how long. You have the right to ask questions.",
                ),
                (
                    "Check what information is classified as 'confidential' and the duration of the agreement.",
                    "Correct! 🎉 Understanding what you can't share and for how long is the most critical part of an NDA.",
                ),
                (
                    "Refuse to sign it because it's an invasion of your privacy.",
                    "Refusing to sign a standard NDA can lead to a job offer being rescinded. It's better to understand it rather than reject it outright.",
                ),
            ],
            1,
        ),
        dilemma(
            "Your new employment contract includes a non-compete clause. What does this mean for your future job opportunities?",
            [
                (
                    "It means you can't work for a competitor for 5 years anywhere in the world.",
                    "Non-compete clauses are usually limited in scope. It's important to check the specific limitations on geography, time, and type of work.",
                ),
                (
                    "It limits your ability to work for a competitor after you leave the company, for a specific period and in a defined geographic area.",
                    "Correct! 🎉 A legally enforceable non-compete must be reasonable in its limitations. Understanding these limits is key.",
                ),
                (
                    "It prevents you from starting your own business in the same industry.",
                    "Not necessarily. A non-compete is specifically about working for a competitor, not starting a new business unless it directly competes.",
                ),
            ],
            1,
        ),
    ]
}
