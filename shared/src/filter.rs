use crate::error::ApiError;
use crate::feed::FeedRefresher;
use crate::VoteType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Date,
    Popularity,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Date => "date",
            OrderBy::Popularity => "popularity",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(OrderBy::Date),
            "popularity" => Some(OrderBy::Popularity),
            _ => None,
        }
    }
}

/// Which slice of the feed to show. Voted and owner filters cannot both be
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    Voted(VoteType),
    Owner(i64),
}

impl FeedScope {
    /// Interpret the "show" selector: `up`/`down` filter by the current
    /// user's vote, an integer filters by owner id, anything else is no
    /// filter.
    pub fn from_show(show: &str) -> Option<Self> {
        if let Some(vote) = VoteType::parse(show) {
            return Some(FeedScope::Voted(vote));
        }
        show.trim().parse::<i64>().ok().map(FeedScope::Owner)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: String,
    pub username: String,
    pub order_by: Option<OrderBy>,
    pub scope: Option<FeedScope>,
}

impl FilterCriteria {
    pub fn title_only(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query parameters for `GET /post/`, without the leading `?`. Empty
    /// criteria produce an empty string.
    pub fn query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !self.title.is_empty() {
            params.push(("title", self.title.clone()));
        }
        if !self.username.is_empty() {
            params.push(("username", self.username.clone()));
        }
        if let Some(order) = self.order_by {
            params.push(("order_by", order.as_str().to_string()));
        }
        match self.scope {
            Some(FeedScope::Voted(vote)) => params.push(("user_vote", vote.as_str().to_string())),
            Some(FeedScope::Owner(id)) => params.push(("user_id", id.to_string())),
            None => {}
        }
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Raw values of the filter panel's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub title: String,
    pub username: String,
    pub order_by: String,
    /// `all`, `up`, `down`, or the current user's id.
    pub show: String,
}

impl FilterForm {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            title: self.title.clone(),
            username: self.username.clone(),
            order_by: OrderBy::parse(&self.order_by),
            scope: FeedScope::from_show(&self.show),
        }
    }

    /// Order does not count as a filter.
    pub fn active_filter_count(&self) -> usize {
        let show_active = !self.show.is_empty() && self.show != "all";
        [!self.title.is_empty(), !self.username.is_empty(), show_active]
            .into_iter()
            .filter(|active| *active)
            .count()
    }

    pub fn reset_label(&self) -> String {
        let n = self.active_filter_count();
        format!("{} Filter{} - Reset", n, if n > 1 { "s" } else { "" })
    }

    pub async fn apply(&self, feed: &dyn FeedRefresher) -> Result<(), ApiError> {
        feed.refresh(self.criteria()).await
    }

    /// Clear every field and fetch the unfiltered feed.
    pub async fn reset(&mut self, feed: &dyn FeedRefresher) -> Result<(), ApiError> {
        *self = Self::default();
        feed.refresh(FilterCriteria::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_values_pick_the_right_scope() {
        assert_eq!(FeedScope::from_show("up"), Some(FeedScope::Voted(VoteType::Up)));
        assert_eq!(FeedScope::from_show("down"), Some(FeedScope::Voted(VoteType::Down)));
        assert_eq!(FeedScope::from_show("42"), Some(FeedScope::Owner(42)));
        assert_eq!(FeedScope::from_show("bob"), None);
        assert_eq!(FeedScope::from_show("all"), None);
        assert_eq!(FeedScope::from_show(""), None);
    }

    #[test]
    fn empty_criteria_has_no_parameters() {
        assert!(FilterCriteria::default().is_empty());
        assert_eq!(FilterCriteria::default().query_string(), "");
        assert_eq!(FilterForm::default().criteria(), FilterCriteria::default());
    }

    #[test]
    fn parameters_are_emitted_in_order_and_encoded() {
        let form = FilterForm {
            title: "cat pics".into(),
            username: "ada".into(),
            order_by: "popularity".into(),
            show: "7".into(),
        };
        assert_eq!(
            form.criteria().query_string(),
            "title=cat%20pics&username=ada&order_by=popularity&user_id=7"
        );

        let liked = FilterForm {
            show: "up".into(),
            ..FilterForm::default()
        };
        assert_eq!(liked.criteria().query_string(), "user_vote=up");
    }

    #[test]
    fn active_filters_ignore_order_and_all() {
        let mut form = FilterForm {
            order_by: "date".into(),
            show: "all".into(),
            ..FilterForm::default()
        };
        assert_eq!(form.active_filter_count(), 0);

        form.title = "rust".into();
        assert_eq!(form.reset_label(), "1 Filter - Reset");

        form.show = "down".into();
        form.username = "bob".into();
        assert_eq!(form.active_filter_count(), 3);
        assert_eq!(form.reset_label(), "3 Filters - Reset");
    }
}
