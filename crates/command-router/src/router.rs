use crate::intent::{Intent, Site};
use crate::providers::{LookupOutcome, Providers};
use crate::routes::classify;
use crate::utterance::{normalize, strip_wake_word};
use crate::{Result, RouterConfig};
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use voice_io::Speak;

const WEB_SEARCH_URL: &str = "https://www.google.com/search?q=";
const MAX_LOGGED_OPTIONS: usize = 10;

/// Whether the main loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// 12-hour clock with AM/PM, e.g. `09:05 PM`
pub fn format_time(now: OffsetDateTime) -> String {
    let (hour, minute) = (now.hour(), now.minute());
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour:02}:{minute:02} {period}")
}

pub struct CommandRouter {
    config: RouterConfig,
    providers: Providers,
}

impl CommandRouter {
    pub fn new(config: RouterConfig, providers: Providers) -> Self {
        Self { config, providers }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Current local time from the configured clock
    pub fn now(&self) -> OffsetDateTime {
        self.providers.clock.now()
    }

    /// The intent `route` would act on, without side effects. `None` only
    /// for empty input; a bare wake word falls through to the web search.
    pub fn intent_for(&self, text: &str) -> Option<Intent> {
        let utterance = normalize(text);
        if utterance.is_empty() {
            return None;
        }
        let command = strip_wake_word(&utterance, &self.config.wake_words);
        Some(match classify(command) {
            Some((_, intent)) => intent,
            None => Intent::WebSearch(utterance),
        })
    }

    /// Dispatch one utterance.
    ///
    /// Provider failures for play, lookup and joke are reported to the user
    /// and swallowed here. Browser failures while opening a site or running
    /// the web search fallback are returned so the caller can log them.
    pub fn route(&self, speaker: &mut dyn Speak, text: &str) -> Result<Flow> {
        let Some(intent) = self.intent_for(text) else {
            debug!("nothing to route");
            return Ok(Flow::Continue);
        };
        info!(intent = intent.name(), "routing command");
        self.perform(speaker, intent)
    }

    fn perform(&self, speaker: &mut dyn Speak, intent: Intent) -> Result<Flow> {
        match intent {
            Intent::Exit => {
                speaker.speak(&self.farewell());
                return Ok(Flow::Exit);
            }
            Intent::Time => {
                speaker.speak(&format!("It's {}.", format_time(self.now())));
            }
            Intent::OpenSite(site) => self.open_site(speaker, site)?,
            Intent::Play(query) => self.play(speaker, query.as_deref()),
            Intent::Lookup(query) => self.lookup(speaker, query.as_deref()),
            Intent::Joke => self.joke(speaker),
            Intent::WebSearch(query) => {
                speaker.speak("Want me to search that on the web?");
                let url = format!("{WEB_SEARCH_URL}{}", urlencoding::encode(&query));
                self.providers.browser.open(&url)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn farewell(&self) -> String {
        match self.config.user_name.as_deref().map(str::trim) {
            Some(user) if !user.is_empty() => format!("Powering down. Bye, {user}!"),
            _ => "Powering down. Bye!".to_string(),
        }
    }

    fn open_site(&self, speaker: &mut dyn Speak, site: Site) -> Result<()> {
        speaker.speak(&format!("Opening {}.", site.label()));
        self.providers.browser.open(site.url())
    }

    fn play(&self, speaker: &mut dyn Speak, query: Option<&str>) {
        let Some(query) = query else {
            speaker.speak("What should I play?");
            return;
        };
        speaker.speak(&format!("Playing {query} on YouTube."));
        if let Err(e) = self.providers.video.play(query) {
            warn!(error = %e, query, "video playback failed");
            speaker.speak("Couldn't open YouTube for that. Try again.");
        }
    }

    fn lookup(&self, speaker: &mut dyn Speak, query: Option<&str>) {
        let Some(query) = query else {
            speaker.speak("Tell me what to search on Wikipedia.");
            return;
        };
        speaker.speak(&format!("Searching Wikipedia for {query}."));
        let sentences = self.config.summary_sentences.max(1);
        match self.providers.encyclopedia.summary(query, sentences) {
            LookupOutcome::Summary(text) => speaker.speak(&text),
            LookupOutcome::Disambiguation(options) => {
                let shown: Vec<&str> = options
                    .iter()
                    .take(MAX_LOGGED_OPTIONS)
                    .map(String::as_str)
                    .collect();
                info!(query, options = ?shown, "ambiguous lookup");
                println!("Disambiguation options: {}", shown.join(", "));
                speaker.speak("That term has multiple meanings. Please be more specific.");
            }
            LookupOutcome::NotFound => {
                speaker.speak("Couldn't find a Wikipedia page for that.");
            }
            LookupOutcome::Failed(reason) => {
                warn!(query, %reason, "encyclopedia lookup failed");
                speaker.speak("Wikipedia seems busy. Try again in a bit.");
            }
        }
    }

    fn joke(&self, speaker: &mut dyn Speak) {
        match self.providers.jokes.joke() {
            Ok(joke) => speaker.speak(&joke),
            Err(e) => {
                warn!(error = %e, "joke provider failed");
                speaker.speak("I tried to find a joke, but something went wrong.");
            }
        }
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::mock::MockProviders;
    use time::macros::datetime;
    use voice_io::RecordingSpeaker;

    fn router_with(mock: MockProviders) -> CommandRouter {
        CommandRouter::new(RouterConfig::default(), mock.into_providers())
    }

    fn run(router: &CommandRouter, text: &str) -> (Flow, Vec<String>) {
        let mut speaker = RecordingSpeaker::default();
        let flow = router.route(&mut speaker, text).unwrap();
        (flow, speaker.lines)
    }

    fn is_twelve_hour(text: &str) -> bool {
        // "It's HH:MM AM."
        let Some(clock) = text.strip_prefix("It's ").and_then(|t| t.strip_suffix('.')) else {
            return false;
        };
        let bytes = clock.as_bytes();
        clock.len() == 8
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[2] == b':'
            && bytes[3..5].iter().all(u8::is_ascii_digit)
            && (clock.ends_with(" AM") || clock.ends_with(" PM"))
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_time(datetime!(2024-03-01 00:07 UTC)), "12:07 AM");
        assert_eq!(format_time(datetime!(2024-03-01 09:05 UTC)), "09:05 AM");
        assert_eq!(format_time(datetime!(2024-03-01 12:00 UTC)), "12:00 PM");
        assert_eq!(format_time(datetime!(2024-03-01 21:45 UTC)), "09:45 PM");
    }

    #[test]
    fn time_query_speaks_clock() {
        for hour in [0u8, 5, 11, 12, 13, 23] {
            let mock = MockProviders {
                now: datetime!(2024-03-01 00:00 UTC).replace_hour(hour).unwrap(),
                ..MockProviders::default()
            };
            let router = router_with(mock);
            let (flow, lines) = run(&router, "What TIME is it");
            assert_eq!(flow, Flow::Continue);
            assert_eq!(lines.len(), 1);
            assert!(is_twelve_hour(&lines[0]), "{}", lines[0]);
        }
    }

    #[test]
    fn exit_words_stop_the_loop() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        for text in ["exit", "quit", "go to sleep", "stop", "play stop and go", "tell me a joke then quit"] {
            let (flow, lines) = run(&router, text);
            assert_eq!(flow, Flow::Exit, "{text}");
            assert_eq!(lines, ["Powering down. Bye!"]);
        }
        assert!(log.calls().is_empty());
    }

    #[test]
    fn farewell_names_the_user() {
        let config = RouterConfig {
            user_name: Some("Tony".into()),
            ..RouterConfig::default()
        };
        let router = CommandRouter::new(config, MockProviders::default().into_providers());
        let (_, lines) = run(&router, "exit");
        assert_eq!(lines, ["Powering down. Bye, Tony!"]);
    }

    #[test]
    fn play_passes_stripped_query() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        let (flow, lines) = run(&router, "play shape of you on youtube");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines, ["Playing shape of you on YouTube."]);
        assert_eq!(log.calls(), ["play shape of you"]);
    }

    #[test]
    fn bare_play_asks_without_calling_provider() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        for text in ["play", "play ", "play on youtube"] {
            let (flow, lines) = run(&router, text);
            assert_eq!(flow, Flow::Continue);
            assert_eq!(lines, ["What should I play?"]);
        }
        assert!(log.calls().is_empty());
    }

    #[test]
    fn play_failure_is_reported_not_raised() {
        let mock = MockProviders {
            video_fails: true,
            ..MockProviders::default()
        };
        let router = router_with(mock);
        let (flow, lines) = run(&router, "play kesariya");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            lines,
            ["Playing kesariya on YouTube.", "Couldn't open YouTube for that. Try again."]
        );
    }

    #[test]
    fn lookup_summary_is_spoken() {
        let mock = MockProviders {
            lookup: LookupOutcome::Summary("Ada Lovelace was a mathematician.".into()),
            ..MockProviders::default()
        };
        let log = mock.log.clone();
        let router = router_with(mock);
        let (_, lines) = run(&router, "who is ada lovelace");
        assert_eq!(
            lines,
            ["Searching Wikipedia for ada lovelace.", "Ada Lovelace was a mathematician."]
        );
        assert_eq!(log.calls(), ["lookup ada lovelace 2"]);
    }

    #[test]
    fn disambiguation_asks_for_detail_without_options() {
        let options: Vec<String> = (0..15).map(|i| format!("Mercury option {i}")).collect();
        let mock = MockProviders {
            lookup: LookupOutcome::Disambiguation(options.clone()),
            ..MockProviders::default()
        };
        let router = router_with(mock);
        let (flow, lines) = run(&router, "wikipedia mercury");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("That term has multiple meanings. Please be more specific.")
        );
        for line in &lines {
            assert!(options.iter().all(|o| !line.contains(o.as_str())), "{line}");
        }
    }

    #[test]
    fn lookup_not_found_and_failure_messages() {
        let router = router_with(MockProviders {
            lookup: LookupOutcome::NotFound,
            ..MockProviders::default()
        });
        let (_, lines) = run(&router, "what is qwzx");
        assert_eq!(lines[1], "Couldn't find a Wikipedia page for that.");

        let router = router_with(MockProviders {
            lookup: LookupOutcome::Failed("timeout".into()),
            ..MockProviders::default()
        });
        let (flow, lines) = run(&router, "what is rust");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines[1], "Wikipedia seems busy. Try again in a bit.");
    }

    #[test]
    fn empty_lookup_query_prompts() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        let (_, lines) = run(&router, "wikipedia");
        assert_eq!(lines, ["Tell me what to search on Wikipedia."]);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn joke_is_spoken_or_apologised_for() {
        let router = router_with(MockProviders::default());
        let (_, lines) = run(&router, "tell me a joke");
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].is_empty());

        let router = router_with(MockProviders {
            jokes_fail: true,
            ..MockProviders::default()
        });
        let (flow, lines) = run(&router, "tell me a joke");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines, ["I tried to find a joke, but something went wrong."]);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        for text in ["", "   ", "\n"] {
            let (flow, lines) = run(&router, text);
            assert_eq!(flow, Flow::Continue);
            assert!(lines.is_empty());
        }
        assert!(log.calls().is_empty());
    }

    #[test]
    fn bare_wake_word_falls_back_to_web_search() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        let (flow, lines) = run(&router, "Jarvis");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines, ["Want me to search that on the web?"]);
        assert_eq!(log.calls(), ["open https://www.google.com/search?q=jarvis"]);
        assert_eq!(router.intent_for("hey jarvis"), Some(Intent::WebSearch("hey jarvis".into())));
    }

    #[test]
    fn wake_word_routes_like_plain_command() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);

        let (_, with_wake) = run(&router, "Jarvis open Google");
        let (_, plain) = run(&router, "open google");
        assert_eq!(with_wake, plain);
        assert_eq!(with_wake, ["Opening Google."]);
        assert_eq!(
            log.calls(),
            ["open https://www.google.com", "open https://www.google.com"]
        );
        assert_eq!(
            router.intent_for("hey jarvis open google"),
            router.intent_for("open google")
        );
    }

    #[test]
    fn fallback_searches_full_utterance() {
        let mock = MockProviders::default();
        let log = mock.log.clone();
        let router = router_with(mock);
        let (flow, lines) = run(&router, "Jarvis weather in Paris & Rome");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines, ["Want me to search that on the web?"]);
        assert_eq!(
            log.calls(),
            ["open https://www.google.com/search?q=jarvis%20weather%20in%20paris%20%26%20rome"]
        );
    }

    #[test]
    fn browser_failure_surfaces_to_caller() {
        let router = router_with(MockProviders {
            browser_fails: true,
            ..MockProviders::default()
        });
        let mut speaker = RecordingSpeaker::default();
        assert!(router.route(&mut speaker, "open youtube").is_err());
        // confirmation is spoken before the browser is asked
        assert_eq!(speaker.lines, ["Opening YouTube."]);
    }

    #[test]
    fn routing_is_idempotent() {
        let router = router_with(MockProviders::default());
        for text in ["what time is it", "play numb", "who is grace hopper", "open youtube", "weather", "exit"] {
            let first = router.intent_for(text);
            let (flow_a, lines_a) = run(&router, text);
            let (flow_b, lines_b) = run(&router, text);
            assert_eq!(first, router.intent_for(text));
            assert_eq!(flow_a, flow_b);
            assert_eq!(lines_a, lines_b);
        }
    }
}
