pub const GENERAL: &str = "\
Interpretor commands include:
  /help   - provides information for interpretor and tor commands
  /events - prints events that we've received
  /info   - general information for a relay
  /quit   - shuts down the interpretor

Tor commands include:
  GETINFO - queries information from tor
  GETCONF, SETCONF, RESETCONF - show or edit a configuration option
  SETEVENTS - configures the events tor will notify us of

Anything else is sent to tor as-is, for instance SIGNAL NEWNYM.";

/// Usage line and description for `topic` (uppercased, without slash).
#[must_use]
pub fn topic(topic: &str) -> Option<(&'static str, &'static str)> {
  let entry = match topic {
    "HELP" => (
      "/help [OPTION]",
      "Provides usage information for the given interpretor or tor command.",
    ),
    "EVENTS" => (
      "/events [types]",
      "Provides events that we've received belonging to the given event types. If\n\
       no types are specified then this provides all the messages that we've\n\
       received.",
    ),
    "INFO" => (
      "/info [relay fingerprint, nickname, or IP address]",
      "Provides information for a relay that's currently in the consensus. If no\n\
       relay is specified then this provides information on ourselves.",
    ),
    "QUIT" => ("/quit", "Terminates the interpretor."),
    "GETINFO" => (
      "GETINFO OPTION",
      "Queries the tor process for information. Options are...",
    ),
    "GETCONF" => (
      "GETCONF OPTION",
      "Provides the current value for a given configuration value.",
    ),
    "SETCONF" => (
      "SETCONF PARAM[=VALUE]",
      "Sets the given configuration parameters. Values can be quoted or\n\
       non-quoted strings, and reverts the option to 0 or NULL if not provided.",
    ),
    "RESETCONF" => (
      "RESETCONF PARAM[=VALUE]",
      "Reverts the given configuration options to their default values. If a\n\
       value is provided then this behaves in the same way as SETCONF.",
    ),
    "SETEVENTS" => (
      "SETEVENTS [EXTENDED] [EVENTS]",
      "Sets the events that we will receive. This turns off any events that\n\
       aren't listed so sending 'SETEVENTS' without any values will turn off all\n\
       event reporting. Received events are listed by /events.",
    ),
    _ => return None,
  };
  Some(entry)
}
