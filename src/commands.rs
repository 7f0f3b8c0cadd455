//! The enumeration of recognized request verbs.
//!
//! Kept as a small closed enum rather than matching on raw strings at every
//! call site: `CommandCode::all()` is what `HandlerRegistry::handler_names`
//! (and hence CAPABILITIES) iterates, so the registered verb list and the
//! advertised verb list can never drift apart.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    Article,
    Head,
    Body,
    Stat,
    Group,
    Listgroup,
    List,
    Over,
    Xover,
    Newgroups,
    Newnews,
    Post,
    Ihave,
    Next,
    Last,
    Date,
    Help,
    Mode,
    Capabilities,
    Quit,
}

impl CommandCode {
    /// All recognized verbs, in the order CAPABILITIES should list them.
    pub const ALL: &'static [CommandCode] = &[
        CommandCode::Article,
        CommandCode::Head,
        CommandCode::Body,
        CommandCode::Stat,
        CommandCode::Group,
        CommandCode::Listgroup,
        CommandCode::List,
        CommandCode::Over,
        CommandCode::Xover,
        CommandCode::Newgroups,
        CommandCode::Newnews,
        CommandCode::Post,
        CommandCode::Ihave,
        CommandCode::Next,
        CommandCode::Last,
        CommandCode::Date,
        CommandCode::Help,
        CommandCode::Mode,
        CommandCode::Capabilities,
        CommandCode::Quit,
    ];

    /// Maps an uppercased wire verb to its code. `None` for anything the
    /// registry doesn't recognize, which the engine replies 500 to.
    pub fn from_verb(verb: &str) -> Option<Self> {
        Some(match verb {
            "ARTICLE" => CommandCode::Article,
            "HEAD" => CommandCode::Head,
            "BODY" => CommandCode::Body,
            "STAT" => CommandCode::Stat,
            "GROUP" => CommandCode::Group,
            "LISTGROUP" => CommandCode::Listgroup,
            "LIST" => CommandCode::List,
            "OVER" => CommandCode::Over,
            "XOVER" => CommandCode::Xover,
            "NEWGROUPS" => CommandCode::Newgroups,
            "NEWNEWS" => CommandCode::Newnews,
            "POST" => CommandCode::Post,
            "IHAVE" => CommandCode::Ihave,
            "NEXT" => CommandCode::Next,
            "LAST" => CommandCode::Last,
            "DATE" => CommandCode::Date,
            "HELP" => CommandCode::Help,
            "MODE" => CommandCode::Mode,
            "CAPABILITIES" => CommandCode::Capabilities,
            "QUIT" => CommandCode::Quit,
            _ => return None,
        })
    }

    /// The canonical wire spelling, used by CAPABILITIES' handler-name list.
    pub fn verb(self) -> &'static str {
        match self {
            CommandCode::Article => "ARTICLE",
            CommandCode::Head => "HEAD",
            CommandCode::Body => "BODY",
            CommandCode::Stat => "STAT",
            CommandCode::Group => "GROUP",
            CommandCode::Listgroup => "LISTGROUP",
            CommandCode::List => "LIST",
            CommandCode::Over => "OVER",
            CommandCode::Xover => "XOVER",
            CommandCode::Newgroups => "NEWGROUPS",
            CommandCode::Newnews => "NEWNEWS",
            CommandCode::Post => "POST",
            CommandCode::Ihave => "IHAVE",
            CommandCode::Next => "NEXT",
            CommandCode::Last => "LAST",
            CommandCode::Date => "DATE",
            CommandCode::Help => "HELP",
            CommandCode::Mode => "MODE",
            CommandCode::Capabilities => "CAPABILITIES",
            CommandCode::Quit => "QUIT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_verb() {
        for &code in CommandCode::ALL {
            assert_eq!(CommandCode::from_verb(code.verb()), Some(code));
        }
    }

    #[test]
    fn unknown_verb_is_none() {
        assert_eq!(CommandCode::from_verb("XYZZY"), None);
    }
}
