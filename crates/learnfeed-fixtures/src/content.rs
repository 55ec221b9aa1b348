use chrono::{Duration, Utc};
use learnfeed_persist::InMemoryCommentStore;
use learnfeed_timeline::{FeedKind, Timeline};
use learnfeed_types::{AIChallenge, Discussion, Post, User};

/// Extra comments on the first related post so it spans several pages
pub const FILLER_COMMENTS: usize = 24;

const RELATED: [(usize, &str, u32, &str); 10] = [
    (1, "交差検証の目的と手順を整理。汎化性能の評価に使える。", 2, "k-分割交差検証は1回だけ実行すれば十分です。"),
    (0, "行列の固有値・固有ベクトルを学習。対角化の直感が掴めた。", 5, "固有値は常に実数になるため複素数は現れません。"),
    (2, "SQLのJOIN句（INNER/LEFT/RIGHT）の違いを復習。", 9, "LEFT JOIN と RIGHT JOIN は常に同じ結果になります。"),
    (3, "Pythonのデコレータでログ付け・キャッシュの実装練習。", 12, "デコレータはメソッドにしか使えず、関数には適用できません。"),
    (4, "Dockerで開発環境を整備。compose の基本も確認。", 15, "Docker コンテナは仮想マシンと同じ仕組みで動作します。"),
    (5, "Transformer の自己注意の数式を読み直した。", 18, "自己注意はクエリとキーを足し算するだけで計算されます。"),
    (1, "クロスエントロピー損失の意味を図で理解。", 22, "クロスエントロピーは二値分類にしか使えません。"),
    (0, "確率分布と期待値の基本を復習。", 26, "期待値は常に観測値の中央値と等しくなります。"),
    (3, "正規表現の先読み・後読みの違いを整理。", 30, "先読みは必ず文字を消費するため、一致部分は短くなります。"),
    (2, "インデックス設計とクエリ最適化の基礎。", 35, "複合インデックスは作成順序に関係なく同一の効果があります。"),
];

const FOLLOWING: [(usize, &str, u32); 5] = [
    (1, "活性化関数の使い分け（ReLU/Swish/GELU）を調査。", 40),
    (3, "イテレータ／ジェネレータの違いをコードで確認。", 44),
    (0, "極限と微分の関係（導関数の定義）を復習。", 47),
    (4, "アクセシビリティ対応（iOS の Dynamic Type）を試した。", 51),
    (5, "形態素解析器の仕組みと辞書のカスタム。", 55),
];

const TRENDING: [(usize, &str, u32); 5] = [
    (4, "TypeScript のユニオン／インターセクション型の実例。", 60),
    (2, "正則化（L1/L2）とモデルのバイアス・バリアンス。", 66),
    (5, "BPE と SentencePiece の違いを比較。", 72),
    (1, "Early Stopping の実運用上の注意点を調べた。", 80),
    (3, "async/await と並列実行（TaskGroup）の基本。", 90),
];

const OPENING_COMMENTS: [&str; 3] = [
    "k回繰り返して平均化するのが一般的です。",
    "「1回だけ実行」は誤りですね。",
    "Leave-One-Out も参考になります。",
];

/// A deterministic spread standing in for random engagement numbers
fn spread(seed: usize, modulus: u32) -> u32 {
    u32::try_from(seed.wrapping_mul(7919) % modulus as usize).unwrap_or(0)
}

/// Users, posts per feed, and the server-side comments behind them
#[derive(Debug, Clone)]
pub struct DemoContent {
    pub users: Vec<User>,
    pub related: Vec<Post>,
    pub following: Vec<Post>,
    pub trending: Vec<Post>,
    /// What a comment source would hold; posts start with nothing loaded
    pub comments: Vec<Discussion>,
}

impl DemoContent {
    pub fn generate() -> Self {
        let users = vec![
            User::new("田中太郎").with_bio("数学好き").with_streak(10).with_total_posts(30).followed(),
            User::new("佐藤花子").with_bio("機械学習勉強中").with_streak(22).with_total_posts(58).followed(),
            User::new("鈴木一郎").with_bio("DB設計得意").with_streak(5).with_total_posts(12),
            User::new("山田次郎").with_bio("Python沼").with_streak(17).with_total_posts(41).followed(),
            User::new("高橋健太").with_bio("Webエンジニア").with_streak(7).with_total_posts(19),
            User::new("伊藤さくら").with_bio("NLP専攻").with_streak(33).with_total_posts(75),
        ];
        let commenters = [
            User::new("山田太郎"),
            User::new("鈴木美咲"),
            User::new("高橋健太"),
        ];
        let now = Utc::now();
        let mut seq = 0usize;

        let mut make_post = |author: usize, summary: &str, minutes_ago: u32| {
            seq += 1;
            Post::new(users[author].clone(), summary)
                .with_server_id(format!("summary-{}", seq))
                .with_created_at(now - Duration::minutes(i64::from(minutes_ago)))
                .with_like_count(spread(seq, 81))
        };

        let mut related = Vec::with_capacity(RELATED.len());
        let mut following = Vec::with_capacity(FOLLOWING.len());
        let mut trending = Vec::with_capacity(TRENDING.len());

        for (author, summary, minutes_ago, statement) in RELATED {
            let post = make_post(author, summary, minutes_ago);
            let challenge = AIChallenge::new(statement)
                .with_votes(spread(related.len() + 1, 31), spread(related.len() + 11, 31));
            related.push(post.with_challenge(challenge));
        }
        for (author, summary, minutes_ago) in FOLLOWING {
            following.push(make_post(author, summary, minutes_ago));
        }
        for (author, summary, minutes_ago) in TRENDING {
            trending.push(make_post(author, summary, minutes_ago));
        }

        let mut comments = Vec::new();
        for (index, post) in related.iter_mut().enumerate() {
            let post_id = post.id();
            let post_comments: Vec<Discussion> = if index == 0 {
                let opening = OPENING_COMMENTS.iter().enumerate().map(|(i, text)| {
                    Discussion::new(post_id, commenters[i].clone(), *text)
                        .with_created_at(now - Duration::minutes(60 - i as i64))
                });
                let filler = (0..FILLER_COMMENTS).map(|i| {
                    Discussion::new(post_id, commenters[i % commenters.len()].clone(), format!("補足 #{}", i + 1))
                        .with_created_at(now - Duration::minutes(50 - i as i64))
                });
                opening.chain(filler).collect()
            } else {
                (0..index % 3)
                    .map(|i| {
                        Discussion::new(post_id, commenters[i].clone(), format!("コメント {}", i + 1))
                            .with_created_at(now - Duration::minutes(10 - i as i64))
                    })
                    .collect()
            };

            // The feed only knows the server's count until comments are opened
            let count = u32::try_from(post_comments.len()).unwrap_or(u32::MAX);
            *post = post.clone().with_comment_count(count);
            comments.extend(post_comments);
        }

        Self {
            users,
            related,
            following,
            trending,
            comments,
        }
    }

    /// Loads every post into its feed
    pub fn install(&self, timeline: &mut Timeline) {
        let feeds = [
            (FeedKind::Related, &self.related),
            (FeedKind::Following, &self.following),
            (FeedKind::Trending, &self.trending),
        ];
        for (feed, posts) in feeds {
            for post in posts {
                timeline.push(feed, post.clone());
            }
        }
        tracing::debug!(posts = timeline.len(), "installed demo content");
    }

    /// Puts the comments into a store as if they already lived on a server
    pub async fn seed_comments(&self, store: &InMemoryCommentStore) {
        store.seed(self.comments.clone()).await;
    }
}
