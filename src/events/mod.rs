//! # 사용자 이벤트 알림
//!
//! 커밋이 확인된 변경만 외부 협력자에게 알립니다. 알림은 fire-and-forget이며
//! 결과를 관찰하지 않고 재시도하지도 않습니다.
//!
//! | 종류 | 토픽 |
//! |------|------|
//! | `Created` | `usersvc.v1.users.create` |
//! | `Updated` | `usersvc.v1.users.update` |
//! | `Deleted` | `usersvc.v1.users.delete` |

use std::fmt;

use log::info;

use crate::domain::entities::users::ProfileId;

const TOPIC_PREFIX: &str = "usersvc.v1.users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "create",
            EventKind::Updated => "update",
            EventKind::Deleted => "delete",
        }
    }

    pub fn topic(&self) -> String {
        format!("{}.{}", TOPIC_PREFIX, self.as_str())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 변경 이벤트를 받는 외부 협력자
pub trait EventNotifier: Send + Sync {
    fn notify(&self, kind: EventKind, subject: &ProfileId);
}

/// 이벤트를 로그로 내보내는 기본 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventNotifier;

impl EventNotifier for LogEventNotifier {
    fn notify(&self, kind: EventKind, subject: &ProfileId) {
        info!("📣 {} {}", kind.topic(), subject);
    }
}

/// 받은 이벤트를 기록하는 테스트용 구현
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: std::sync::Mutex<Vec<(EventKind, ProfileId)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn events(&self) -> Vec<(EventKind, ProfileId)> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl EventNotifier for RecordingNotifier {
    fn notify(&self, kind: EventKind, subject: &ProfileId) {
        if let Ok(mut events) = self.events.lock() {
            events.push((kind, *subject));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics() {
        assert_eq!(EventKind::Created.topic(), "usersvc.v1.users.create");
        assert_eq!(EventKind::Updated.topic(), "usersvc.v1.users.update");
        assert_eq!(EventKind::Deleted.topic(), "usersvc.v1.users.delete");
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        let first = ProfileId::generate();
        let second = ProfileId::generate();

        notifier.notify(EventKind::Created, &first);
        notifier.notify(EventKind::Deleted, &second);

        assert_eq!(
            notifier.events(),
            vec![(EventKind::Created, first), (EventKind::Deleted, second)]
        );
    }
}
