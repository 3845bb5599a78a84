use storefront_api::Category;

/// What happens when the user picks an entry in the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// The category has children; the menu now shows them
    Descend,
    /// Leaf category (or "show all"): open its product listing
    OpenListing {
        category_id: String,
        category_name: String,
    },
}

/// Drill-down through the category tree, one level at a time
///
/// The stack holds every category entered so far; the top of the stack is
/// the level whose children are on screen.
#[derive(Debug, Clone, Default)]
pub struct MenuNavigator {
    roots: Vec<Category>,
    stack: Vec<Category>,
}

impl MenuNavigator {
    pub fn new(roots: Vec<Category>) -> Self {
        Self {
            roots,
            stack: Vec::new(),
        }
    }

    /// Entries on the current level. Nameless entries aren't shown.
    pub fn current_items(&self) -> Vec<&Category> {
        let level = match self.stack.last() {
            Some(current) => &current.children,
            None => &self.roots,
        };
        level.iter().filter(|c| !c.name.is_empty()).collect()
    }

    /// Category whose children are on screen, `None` at the top level
    pub fn current(&self) -> Option<&Category> {
        self.stack.last()
    }

    pub fn title(&self) -> Option<&str> {
        self.current().map(|c| c.name.as_str())
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pick an entry on the current level by id
    ///
    /// Returns `None` if no visible entry on this level has that id.
    pub fn select(&mut self, id: &str) -> Option<MenuAction> {
        let chosen = self
            .current_items()
            .into_iter()
            .find(|c| c.id == id)
            .cloned()?;

        if chosen.has_children {
            self.stack.push(chosen);
            Some(MenuAction::Descend)
        } else {
            Some(open_listing(&chosen))
        }
    }

    /// Go up one level. Returns false when already at the top.
    pub fn back(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// "Show all" for the category currently entered
    pub fn show_current(&self) -> Option<MenuAction> {
        self.current().map(open_listing)
    }
}

fn open_listing(category: &Category) -> MenuAction {
    MenuAction::OpenListing {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, name: &str) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            children: vec![],
            has_children: false,
        }
    }

    fn branch(id: &str, name: &str, children: Vec<Category>) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            has_children: !children.is_empty(),
            children,
        }
    }

    fn sample_menu() -> MenuNavigator {
        MenuNavigator::new(vec![
            branch(
                "1",
                "Damen",
                vec![leaf("11", "Schuhe"), branch("12", "", vec![leaf("121", "X")])],
            ),
            leaf("2", "Sale"),
        ])
    }

    #[test]
    fn test_starts_at_roots() {
        let menu = sample_menu();
        assert!(menu.is_root());
        assert!(menu.title().is_none());
        let ids: Vec<_> = menu.current_items().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_select_branch_descends() {
        let mut menu = sample_menu();
        assert_eq!(menu.select("1"), Some(MenuAction::Descend));
        assert_eq!(menu.title(), Some("Damen"));
        assert!(!menu.is_root());

        // Nameless child is hidden
        let ids: Vec<_> = menu.current_items().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["11"]);
    }

    #[test]
    fn test_select_leaf_opens_listing() {
        let mut menu = sample_menu();
        assert_eq!(
            menu.select("2"),
            Some(MenuAction::OpenListing {
                category_id: "2".into(),
                category_name: "Sale".into(),
            })
        );
        assert!(menu.is_root());
    }

    #[test]
    fn test_select_unknown_or_hidden_id() {
        let mut menu = sample_menu();
        assert_eq!(menu.select("11"), None);
        menu.select("1");
        assert_eq!(menu.select("12"), None);
    }

    #[test]
    fn test_back_pops_until_root() {
        let mut menu = sample_menu();
        menu.select("1");
        assert!(menu.back());
        assert!(menu.is_root());
        assert!(!menu.back());
    }

    #[test]
    fn test_show_current() {
        let mut menu = sample_menu();
        assert_eq!(menu.show_current(), None);
        menu.select("1");
        assert_eq!(
            menu.show_current(),
            Some(MenuAction::OpenListing {
                category_id: "1".into(),
                category_name: "Damen".into(),
            })
        );
    }
}
