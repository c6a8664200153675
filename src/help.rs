//! Тематические справки (--help-add, --help-symlink, --help-sequence)

pub const HELP_ADD: &str = r#"
Добавление записей
==================

Чтобы passautotype мог ввести пароль в окно, добавьте записи в pass-хранилище.

- WINDOWTITLE - часть заголовка окна, по которой подбирается пароль.
  Например, "Testwebsite" совпадёт с заголовком "This is my Testwebsite"
  (без учёта регистра). Пробелы и спецсимволы допустимы, но не забывайте
  экранировать их для своей оболочки (сам pass обрабатывает их без проблем,
  даже символы вроде "|").
- ACCOUNT - произвольное имя аккаунта; показывается в диалоге выбора,
  когда для сайта сохранено несколько аккаунтов. Записи без ACCOUNT
  лежат прямо в каталоге заголовка - это аккаунт по умолчанию.

Только пароль:
--------------
pass insert 'autotype/WINDOWTITLE/password'
pass insert 'autotype/WINDOWTITLE/ACCOUNT/password'

Логин и пароль:
---------------
pass insert 'autotype/WINDOWTITLE/ACCOUNT/username'
pass insert 'autotype/WINDOWTITLE/ACCOUNT/password'

Своя последовательность ввода:
------------------------------
pass insert 'autotype/WINDOWTITLE/ACCOUNT/username'
pass insert 'autotype/WINDOWTITLE/ACCOUNT/password'
pass insert -m 'autotype/WINDOWTITLE/ACCOUNT/sequence'

Подробнее о языке sequence: passautotype --help-sequence
"#;

pub const HELP_SYMLINK: &str = r#"
Алиасы существующих записей
===========================

Обычную pass-запись можно подключить к автовводу без дублирования секрета:

passautotype -s SOURCE_ENTRY 'WINDOWTITLE[/ACCOUNT]'

Например:

passautotype -s 'user@site' 'Site Title/default'

создаст символьную ссылку
~/.password-store/autotype/Site Title/default/password.gpg -> user@site.gpg
и предложит дополнительно ввести username и sequence.

Команда откажется работать (код выхода 1), если исходная запись не
существует или у алиаса уже есть password-запись.

То же самое вручную:
$ mkdir -p ~/.password-store/autotype/sitetitle/default/
$ ln -s ~/.password-store/user@site.gpg \
        ~/.password-store/autotype/sitetitle/default/password.gpg
$ pass insert -e autotype/sitetitle/default/username
"#;

pub const HELP_SEQUENCE: &str = r#"
Язык sequence-записей
=====================

Каждая строка записи sequence - одна инструкция:

- "USER":        ввести username
- "PASS":        ввести password
- "KEY somekey": нажать клавишу
- "TEXT x":      ввести произвольный текст
- "SLEEP X":     пауза X секунд (дробное значение)

Нераспознанные строки пропускаются без ошибки.

Имена клавиш - в синтаксисе xdotool, с учётом регистра.
Примеры: Tab, Return, BackSpace, ctrl+a, shift+Tab.

Пример: вход на сайт, где логин и пароль запрашиваются
на разных страницах:

USER
KEY Return
SLEEP 0.5
PASS
KEY Return
"#;
