//! 并发访问测试
//!
//! 多线程同时匹配、注册和注销时，匹配器状态保持一致

#[cfg(test)]
mod tests {
    use command_matcher::{CommandMatcher, MatcherConfig};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Ping,
        Echo,
        Help,
    }

    /// 创建测试用的匹配器
    fn create_test_matcher() -> Arc<CommandMatcher<Action>> {
        let matcher = CommandMatcher::new();
        matcher.register(["!ping", "!p"], Action::Ping);
        matcher.register(["!echo", "!say"], Action::Echo);
        matcher.register(["!help", "!h", "!?"], Action::Help);
        Arc::new(matcher)
    }

    fn inputs() -> Vec<&'static str> {
        vec!["!ping", "!p now", "!echo hello world", "!say", "!help me", "!?", "!unknown x", ""]
    }

    #[test]
    fn test_parallel_matches_agree_with_sequential_baseline() {
        let matcher = create_test_matcher();
        let baseline: Vec<_> = inputs().into_iter().map(|text| matcher.match_text(text)).collect();

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let matcher = Arc::clone(&matcher);
                let barrier = Arc::clone(&barrier);
                let baseline = baseline.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..500 {
                        for (text, expected) in inputs().into_iter().zip(&baseline) {
                            assert_eq!(&matcher.match_text(text), expected);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("reader thread panicked");
        }
    }

    #[test]
    fn test_readers_see_whole_registrations() {
        let matcher: Arc<CommandMatcher<u32>> = Arc::new(CommandMatcher::new());
        let rounds = 200;

        let writer = {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                for round in 0..rounds {
                    matcher.register(["!a", "!b"], round);
                    matcher.deregister(&round);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let matcher = Arc::clone(&matcher);
                thread::spawn(move || {
                    for _ in 0..rounds {
                        // A batch is applied atomically: both aliases or neither.
                        matcher.for_each(|aliases, _| assert_eq!(aliases.len(), 2));
                        let len = matcher.len();
                        assert!(len == 0 || len == 2, "unexpected alias count {}", len);
                    }
                })
            })
            .collect();

        writer.join().expect("writer thread panicked");
        for reader in readers {
            reader.join().expect("reader thread panicked");
        }
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_separator_change_is_visible_to_other_threads() {
        let config = MatcherConfig {
            separator: ",".to_string(),
        };
        let matcher = Arc::new(CommandMatcher::from_config(&config).unwrap());
        matcher.register(["!a"], 1u8);

        let updater = {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || matcher.set_separator(";"))
        };
        updater.join().unwrap().unwrap();

        let result = matcher.match_text("!a;x;y");
        assert_eq!(result.command, Some(1));
        assert_eq!(result.args(), ["x".to_string(), "y".to_string()]);
    }
}
