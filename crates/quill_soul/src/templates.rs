//! Perspective message rendering.
//!
//! One template produces three sentences: what the actor reads ("You grin
//! evilly at max."), what bystanders read ("Julie grins evilly at max.") and
//! what the targets read ("Julie grins evilly at you.").

use quill_foundation::lang;

use crate::scope::Descriptor;

/// Who is reading the message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Perspective {
    /// The one performing the verb.
    Actor,
    /// Bystanders in the location.
    Room,
    /// The verb's targets.
    Target,
}

/// Everything a template can refer to.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
    /// The actor.
    pub actor: &'a Descriptor,
    /// Distinct targets, in mention order.
    pub targets: Vec<&'a Descriptor>,
    /// Leading qualifier.
    pub qualifier: Option<&'a str>,
    /// Adverb, default already applied.
    pub adverb: Option<&'a str>,
    /// Body part phrase, default already applied.
    pub bodypart: Option<&'a str>,
    /// Message as it should appear for `{what}` (quoted if player-supplied).
    pub what: Option<String>,
    /// Message as it should appear for `{msg}`.
    pub msg: Option<&'a str>,
}

impl Scene<'_> {
    fn is_actor(&self, target: &Descriptor) -> bool {
        target.id == self.actor.id
    }

    fn who(&self, perspective: Perspective) -> String {
        if perspective == Perspective::Target {
            return "you".to_string();
        }
        let names: Vec<String> = self
            .targets
            .iter()
            .map(|t| match (self.is_actor(t), perspective) {
                (true, Perspective::Actor) => "yourself".to_string(),
                (true, _) => self.actor.gender.reflexive().to_string(),
                (false, _) => t.title.clone(),
            })
            .collect();
        lang::join(&names, "and")
    }

    fn poss(&self, perspective: Perspective) -> String {
        if perspective == Perspective::Target {
            return "your".to_string();
        }
        let names: Vec<String> = self
            .targets
            .iter()
            .map(|t| match (self.is_actor(t), perspective) {
                (true, Perspective::Actor) => "your own".to_string(),
                (true, _) => format!("{} own", self.actor.gender.possessive()),
                (false, _) => lang::possessive(&t.title),
            })
            .collect();
        lang::join(&names, "and")
    }

    fn your(&self, perspective: Perspective) -> &'static str {
        match perspective {
            Perspective::Actor => "your",
            _ => self.actor.gender.possessive(),
        }
    }

    fn is(&self, perspective: Perspective) -> String {
        match (perspective, self.targets.as_slice()) {
            (Perspective::Target, _) => "are you".to_string(),
            (Perspective::Actor, [one]) if self.is_actor(one) => "are you".to_string(),
            (_, [one]) => format!("is {}", one.gender.subjective()),
            _ => "are they".to_string(),
        }
    }

    fn placeholder(&self, name: &str, perspective: Perspective) -> String {
        match name {
            "how" => self.adverb.unwrap_or_default().to_string(),
            "where" => self.bodypart.unwrap_or_default().to_string(),
            "what" => self.what.clone().unwrap_or_default(),
            "msg" => self.msg.unwrap_or_default().to_string(),
            "question" => {
                let msg = self.msg.unwrap_or_default().trim_end_matches(['.', '!', '?']);
                format!("{msg}?")
            }
            "who" => self.who(perspective),
            "poss" => self.poss(perspective),
            "your" => self.your(perspective).to_string(),
            "is" => self.is(perspective),
            other => format!("{{{other}}}"),
        }
    }
}

/// Fills in a template. With `conjugate`, `$verb` words take the third person.
#[must_use]
pub fn render(template: &str, scene: &Scene<'_>, perspective: Perspective, conjugate: bool) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '$' => {
                let mut verb = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_alphabetic() {
                        break;
                    }
                    verb.push(c);
                    chars.next();
                }
                if conjugate {
                    out.push_str(&lang::conjugate(&verb));
                } else {
                    out.push_str(&verb);
                }
            }
            '{' => {
                let mut name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    name.push(c);
                }
                out.push_str(&scene.placeholder(&name, perspective));
            }
            _ => out.push(ch),
        }
    }
    out
}

/// The verb phrase after the subject, qualifier applied.
#[must_use]
pub fn predicate(template: &str, scene: &Scene<'_>, perspective: Perspective) -> String {
    let third = perspective != Perspective::Actor;
    match scene.qualifier {
        Some("fail") => {
            let base = render(template, scene, perspective, false);
            if third {
                format!("tries to {base}, but fails miserably")
            } else {
                format!("try to {base}, but fail miserably")
            }
        }
        Some("don't") => {
            let base = render(template, scene, perspective, false);
            if third {
                format!("doesn't {base}")
            } else {
                format!("don't {base}")
            }
        }
        Some(other) => format!("{other} {}", render(template, scene, perspective, third)),
        None => render(template, scene, perspective, third),
    }
}

/// A complete sentence for one perspective.
#[must_use]
pub fn sentence(template: &str, scene: &Scene<'_>, perspective: Perspective) -> String {
    let subject = match perspective {
        Perspective::Actor => "you",
        Perspective::Room | Perspective::Target => scene.actor.title.as_str(),
    };
    let text = tidy(&format!("{subject} {}", predicate(template, scene, perspective)));
    lang::fullstop(&lang::capital(&text))
}

/// Collapses runs of whitespace and drops spaces before punctuation.
#[must_use]
pub fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        let glued = word.starts_with([',', ':', ';', '.', '?', '!']);
        if !out.is_empty() && !glued {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
