// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Category-keyed response messages, written for a child reader.
//!
//! Crisis messages embed the matching support resource. Every category a
//! detector can emit has a message; lookups are total.

use crate::safety::bullying::BullyingCategory;
use crate::safety::crisis::CrisisCategory;
use crate::safety::profanity::ProfanityAction;
use crate::safety::requests::RequestCategory;

/// Message for a crisis category, with the matching support resource.
pub fn crisis_response(category: CrisisCategory) -> &'static str {
    match category {
        CrisisCategory::Suicide => {
            "I'm really glad you told me how you're feeling. You matter, and you deserve \
             support right now. Please talk to a trusted adult, or call or text 988 to \
             reach the Suicide & Crisis Lifeline - they're there for you any time, day \
             or night."
        }
        CrisisCategory::SelfHarm => {
            "Thank you for trusting me with this. Hurting yourself is never the only \
             option, and you don't have to handle these feelings alone. Please tell a \
             trusted adult, or call or text 988 to reach the Suicide & Crisis Lifeline."
        }
        CrisisCategory::AbuseSexual => {
            "I'm so sorry this is happening. What you described is not okay, and it is \
             not your fault. Please tell a trusted adult like a teacher or school \
             counselor right away, or call the Childhelp hotline at 1-800-422-4453 - \
             they will listen and help keep you safe."
        }
        CrisisCategory::AbusePhysical => {
            "I'm really sorry you're going through this. Nobody is allowed to hurt you, \
             and it is not your fault. Please tell a trusted adult like a teacher or \
             school counselor, or call the Childhelp hotline at 1-800-422-4453 for help."
        }
        CrisisCategory::AbuseEmotional => {
            "I'm sorry you're being treated this way. The things being said to you are \
             not true and not okay. Please talk to a trusted adult about what's \
             happening, or call the Childhelp hotline at 1-800-422-4453 - they \
             understand and want to help."
        }
    }
}

/// Message for a disallowed-request category.
pub fn request_response(category: RequestCategory) -> &'static str {
    match category {
        RequestCategory::Violence => {
            "I can't help with anything that could hurt someone. If you're feeling \
             really angry, that's okay - want to talk about what's going on instead?"
        }
        RequestCategory::Sexual => {
            "That's not something I can talk about. If you have questions about your \
             body or growing up, a parent, guardian, or school nurse is the right \
             person to ask."
        }
        RequestCategory::Illegal => {
            "I can't help with that - it's against the rules and could get you in real \
             trouble. If something is making you feel like you need to do this, let's \
             talk about it."
        }
        RequestCategory::Manipulation => {
            "I can't keep secrets from the grown-ups who take care of you - that's one \
             of my rules, because it keeps you safe. If something feels like it needs \
             to be a secret, that's usually a sign to tell a trusted adult."
        }
        RequestCategory::SafetyBypass => {
            "Nice try! My safety rules always stay on - they're how I make sure our \
             chats stay fun and safe. What else would you like to talk about?"
        }
        RequestCategory::HarmfulAdvice => {
            "I can't give advice about that because it could hurt you, and your safety \
             comes first. Please talk to a parent, guardian, doctor, or school nurse - \
             they can actually help with this."
        }
        RequestCategory::PersonalInfo => {
            "It's really important to keep private things like addresses, passwords, \
             and photos to yourself online. I'll never ask you for those, and you \
             shouldn't share them with anyone on the internet."
        }
    }
}

/// Message for a profanity action.
pub fn profanity_response(action: ProfanityAction) -> &'static str {
    match action {
        ProfanityAction::Allow => "",
        ProfanityAction::GentleEducate => {
            "Oops, that's not the nicest word! Let's try saying that a different way."
        }
        ProfanityAction::GentleReminder => {
            "Hey, we've talked about this one before - let's keep picking kinder words, \
             okay?"
        }
        ProfanityAction::Educate => {
            "That word isn't okay to use here. Strong feelings are fine - let's find \
             better words for them."
        }
        ProfanityAction::WarnAndLimit => {
            "We've talked about language like this a few times now, so I can't pass \
             this message along. Let's take a breath and try again with different words."
        }
        ProfanityAction::BlockAndEducate => {
            "That language is not okay here, so I can't respond to that message. I'm \
             still happy to chat when you're ready to use kinder words."
        }
    }
}

/// Supportive message for a bullying category.
pub fn bullying_response(primary: BullyingCategory) -> &'static str {
    match primary {
        BullyingCategory::Threats => {
            "That sounds scary, and I'm glad you told me. Threats are serious - please \
             tell a trusted adult like a parent or teacher right away so they can help \
             keep you safe."
        }
        BullyingCategory::Physical => {
            "I'm sorry someone is hurting you - that is never okay. Please tell a \
             teacher, parent, or another trusted adult what's happening. You deserve to \
             feel safe."
        }
        BullyingCategory::Cyberbullying => {
            "I'm sorry that's happening online. Try not to reply, save what you can, \
             and show a trusted adult. You don't have to deal with mean messages alone."
        }
        BullyingCategory::Verbal => {
            "I'm really sorry kids are treating you that way - it's not okay, and it's \
             not about anything being wrong with you. Telling a trusted adult like a \
             teacher or parent can really help."
        }
        BullyingCategory::SocialExclusion => {
            "Being left out hurts a lot, and I'm sorry you're feeling that. You deserve \
             friends who include you. Talking to a trusted adult about it can help, and \
             I'm always here to listen."
        }
        BullyingCategory::EmotionalImpact => {
            "It sounds like things have been really hard lately. Those feelings are \
             real, and you don't have to carry them alone - please share what's going \
             on with a parent, teacher, or school counselor."
        }
    }
}
