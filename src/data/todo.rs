use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TodoId(pub u64);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
    next_id: u64,
}

impl TodoList {
    /// Appends a new open item. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        if text.trim().is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = TodoId(self.next_id);
        self.items.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    pub fn toggle(&mut self, id: TodoId) {
        if let Some(item) = self.items.iter_mut().find(|t| t.id == id) {
            item.completed = !item.completed;
        }
    }

    pub fn delete(&mut self, id: TodoId) {
        self.items.retain(|t| t.id != id);
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_toggle_delete_lifecycle() {
        let mut list = TodoList::default();
        let id = list.add("wash dishes").unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list.items[0].completed);
        assert_eq!(list.items[0].text, "wash dishes");

        list.toggle(id);
        assert!(list.get(id).unwrap().completed);

        list.delete(id);
        assert!(list.is_empty());
    }

    #[test]
    fn test_blank_text_not_added() {
        let mut list = TodoList::default();
        assert!(list.add("").is_none());
        assert!(list.add("   ").is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut list = TodoList::default();
        let a = list.add("a").unwrap();
        let b = list.add("b").unwrap();
        list.delete(a);
        let c = list.add("c").unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut list = TodoList::default();
        let id = list.add("x").unwrap();
        list.toggle(id);
        list.toggle(id);
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut list = TodoList::default();
        list.add("x");
        list.toggle(TodoId(999));
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_delete_only_matching_item() {
        let mut list = TodoList::default();
        let a = list.add("a").unwrap();
        list.add("b");
        list.delete(a);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items[0].text, "b");
        list.delete(TodoId(42));
        assert_eq!(list.len(), 1);
    }
}
