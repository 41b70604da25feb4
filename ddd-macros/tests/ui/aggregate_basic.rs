use ddd_domain::aggregate::{Aggregate, Entity};
use ddd_macros::{aggregate, domain_event};
use serde::{Deserialize, Serialize};

#[aggregate(id = String)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Account {
    name: String,
}

#[domain_event(event_type = "account.renamed")]
struct AccountRenamed {
    name: String,
}

impl Account {
    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.add_domain_event(AccountRenamed::new(name.to_string()));
    }
}

fn main() {
    let mut account = Account::new("acc-1".to_string());
    account.rename("alice");
    assert_eq!(account.id(), "acc-1");
    assert_eq!(account.version(), 0);
    assert_eq!(account.domain_events().len(), 1);

    account.set_version(3);
    account.bump_version();
    assert_eq!(account.version(), 4);

    // 事件缓冲区不参与序列化
    let json = serde_json::to_value(&account).unwrap();
    assert!(json.get("domain_events").is_none());

    let drained = account.take_domain_events();
    assert_eq!(drained.len(), 1);
    assert!(account.domain_events().is_empty());
}
